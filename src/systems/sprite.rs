//! Sprite update system.
//!
//! Runs every [`Sprite`]'s update routine once per tick with the scaled world
//! delta and the current input snapshot.
use bevy_ecs::prelude::*;
use log::error;

use crate::components::sprite::{Sprite, SpriteTick};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Tick every sprite.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta and [`InputState`] for the routine.
/// - Feeds each sprite's animator clock before its routine runs.
/// - A failing routine is logged and does not stop the other sprites.
pub fn update_sprites(
    mut query: Query<(Entity, &mut Sprite)>,
    time: Res<WorldTime>,
    input: Res<InputState>,
) {
    let tick = SpriteTick {
        delta: time.delta_duration(),
        elapsed: time.elapsed_duration(),
        input: &*input,
    };
    for (entity, mut sprite) in query.iter_mut() {
        if let Err(e) = sprite.update(&tick) {
            error!("Sprite {:?} update failed: {}", entity, e);
        }
    }
}
