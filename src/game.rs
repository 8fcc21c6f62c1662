//! Fox demo setup and tick loop.
//!
//! Builds a world with one animated fox sprite, drives it with scripted
//! input and collects draw commands for a backend. The fox picks its
//! animation the way a platformer character would:
//!
//! - `idle` while standing, switching to `idle_look` after five idle seconds
//!   and rewinding once that look has played through,
//! - `trot` while any movement action is held, flipping to face left/right,
//! - `jump` for one full cycle after the jump action is pressed.

use std::time::Duration;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animator::AnimationControl;
use crate::components::sprite::{Origin, Sprite, SpriteTick, TextureRef};
use crate::error::{AnimationError, StoreError};
use crate::resources::animationstore::AnimationStore;
use crate::resources::drawqueue::DrawQueue;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::input::{Action, InputState};
use crate::resources::worldtime::WorldTime;
use crate::systems::render::collect_draw_commands;
use crate::systems::sprite::update_sprites;
use crate::systems::time::update_world_time;

pub const SCREEN_WIDTH: f32 = 640.0;
pub const SCREEN_HEIGHT: f32 = 480.0;

/// Fox spritesheet: 14 columns by 7 rows of 32x32 cells.
pub const FOX_TEXTURE: &str = "fox_sprite_sheet";
pub const FOX_SHEET_WIDTH: i32 = 448;
pub const FOX_SHEET_HEIGHT: i32 = 224;

pub const IDLE: &str = "idle";
pub const IDLE_LOOK: &str = "idle_look";
pub const TROT: &str = "trot";
pub const JUMP: &str = "jump";

/// Standing time after which the fox looks around.
pub const IDLE_LOOK_AFTER: Duration = Duration::from_secs(5);

/// Pixels moved per tick while a movement action is held.
const FOX_SPEED: f32 = 3.0;

/// Animation definitions for the fox sheet, used when no file is supplied.
pub const FOX_ANIMATIONS_JSON: &str = r#"{
    "idle": {
        "start_frame": { "x": 0, "y": 0, "width": 32, "height": 32 },
        "frame_count": 5,
        "delay_ms": 150,
        "direction": "horizontal"
    },
    "idle_look": {
        "start_frame": { "x": 0, "y": 32, "width": 32, "height": 32 },
        "frame_count": 14,
        "delay_ms": 150,
        "direction": "horizontal"
    },
    "trot": {
        "start_frame": { "x": 0, "y": 64, "width": 32, "height": 32 },
        "frame_count": 8,
        "delay_ms": 150,
        "direction": "horizontal"
    },
    "jump": {
        "start_frame": { "x": 0, "y": 96, "width": 32, "height": 32 },
        "frame_count": 11,
        "delay_ms": 100,
        "direction": "horizontal"
    }
}"#;

/// Per-fox animation selection state.
#[derive(Debug, Clone, Default)]
pub struct FoxController {
    not_moved_in: Duration,
    jumping: bool,
    /// Time spent in the current jump, summed from tick deltas.
    jump_time: Duration,
}

impl FoxController {
    /// Decide what the fox plays this tick and move it.
    pub fn update(
        &mut self,
        sprite: &mut Sprite,
        tick: &SpriteTick<'_>,
    ) -> Result<(), AnimationError> {
        sprite.play(IDLE)?;

        self.not_moved_in += tick.delta;
        if self.not_moved_in > IDLE_LOOK_AFTER {
            sprite.play(IDLE_LOOK)?;
            let cycle = cycle_of(sprite);
            if self.not_moved_in > IDLE_LOOK_AFTER + cycle {
                if let Some(animator) = sprite.animator.as_mut() {
                    animator.reset()?;
                }
                self.not_moved_in = Duration::ZERO;
            }
        }

        let input = tick.input;
        let moves = [
            (Action::Up, Vec2::new(0.0, -FOX_SPEED)),
            (Action::Left, Vec2::new(-FOX_SPEED, 0.0)),
            (Action::Down, Vec2::new(0.0, FOX_SPEED)),
            (Action::Right, Vec2::new(FOX_SPEED, 0.0)),
        ];
        for (action, step) in moves {
            if input.is_active(action) {
                sprite.play(TROT)?;
                sprite.position += step;
                self.not_moved_in = Duration::ZERO;
            }
        }
        if input.is_active(Action::Left) {
            sprite.flip_horizontal(true);
        }
        if input.is_active(Action::Right) {
            sprite.flip_horizontal(false);
        }

        if input.just_pressed(Action::Jump) {
            debug!("Fox jumps at {:?}", tick.elapsed);
            self.not_moved_in = Duration::ZERO;
            self.jumping = true;
            self.jump_time = Duration::ZERO;
        } else if self.jumping {
            self.jump_time += tick.delta;
        }

        if self.jumping {
            sprite.play(JUMP)?;
            if self.jump_time > cycle_of(sprite) {
                self.jumping = false;
            }
        }

        Ok(())
    }
}

fn cycle_of(sprite: &Sprite) -> Duration {
    sprite
        .animator
        .as_ref()
        .map_or(Duration::ZERO, |a| a.total_cycle_duration())
}

/// Build the fox sprite with its own animator and controller.
pub fn fox_sprite(store: &AnimationStore) -> Result<Sprite, StoreError> {
    let animator = store.build_animator()?;
    let mut controller = FoxController::default();
    let mut sprite = Sprite::new(
        TextureRef::new(FOX_TEXTURE, FOX_SHEET_WIDTH, FOX_SHEET_HEIGHT),
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
    )
    .with_animator(animator)
    .with_origin(Origin::Center)
    .with_update(move |sprite, tick| controller.update(sprite, tick));
    sprite.set_scale(4.0, 4.0);
    Ok(sprite)
}

/// Create a world with every resource the systems read.
pub fn build_world(config: &EngineConfig, store: AnimationStore) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        time_scale: config.time_scale,
        ..Default::default()
    });
    world.insert_resource(InputState::default());
    world.insert_resource(DrawQueue::default());
    world.insert_resource(store);
    world.insert_resource(config.clone());
    world
}

/// Spawn the fox using the world's [`AnimationStore`].
pub fn spawn_fox(world: &mut World) -> Result<Entity, StoreError> {
    let sprite = fox_sprite(world.resource::<AnimationStore>())?;
    Ok(world.spawn(sprite).id())
}

/// Per-tick schedule: sprite logic, then draw command collection.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((update_sprites, collect_draw_commands).chain());
    schedule
}

/// Advance time by `dt` seconds and run one tick.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

/// Pseudo-random held actions, changing every few ticks.
pub struct ScriptedInput {
    rng: fastrand::Rng,
    held: Vec<Action>,
    hold_ticks_left: u32,
}

impl ScriptedInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            held: Vec::new(),
            hold_ticks_left: 0,
        }
    }

    /// Actions held for the next tick.
    pub fn next_tick(&mut self) -> &[Action] {
        if self.hold_ticks_left == 0 {
            self.held.clear();
            // Standing still half of the time lets the idle animations show.
            if self.rng.bool() {
                let action = Action::ALL[self.rng.usize(..Action::ALL.len())];
                self.held.push(action);
            }
            self.hold_ticks_left = self.rng.u32(10..120);
        }
        self.hold_ticks_left -= 1;
        &self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_is_deterministic() {
        let mut a = ScriptedInput::new(7);
        let mut b = ScriptedInput::new(7);
        for _ in 0..500 {
            assert_eq!(a.next_tick(), b.next_tick());
        }
    }

    #[test]
    fn test_jump_ends_with_stalled_elapsed() {
        let store = AnimationStore::from_json_str(FOX_ANIMATIONS_JSON).unwrap();
        let mut sprite = fox_sprite(&store).unwrap();
        let mut input = InputState::default();
        // Far enough out that f32 seconds no longer move by a quarter second.
        let elapsed = Duration::from_secs(1 << 20);
        let delta = Duration::from_millis(250);

        let mut step = |sprite: &mut Sprite, held: &[Action]| {
            input.apply(held);
            let tick = SpriteTick {
                delta,
                elapsed,
                input: &input,
            };
            sprite.update(&tick).unwrap();
            sprite.animator.as_ref().unwrap().current_name().map(str::to_owned)
        };

        assert_eq!(step(&mut sprite, &[Action::Jump]).as_deref(), Some(JUMP));
        // The jump cycle is 1.1s: still jumping after 1.0s of deltas.
        for _ in 0..4 {
            assert_eq!(step(&mut sprite, &[]).as_deref(), Some(JUMP));
        }
        // 1.25s exceeds the cycle, so this is the jump's last tick.
        assert_eq!(step(&mut sprite, &[]).as_deref(), Some(JUMP));
        assert_eq!(step(&mut sprite, &[]).as_deref(), Some(IDLE));
    }

    #[test]
    fn test_builtin_definitions_parse() {
        let store = AnimationStore::from_json_str(FOX_ANIMATIONS_JSON).unwrap();
        for name in [IDLE, IDLE_LOOK, TROT, JUMP] {
            assert!(store.get(name).is_some(), "{name}");
        }
    }
}
