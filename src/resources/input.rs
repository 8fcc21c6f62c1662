//! Per-tick input snapshot resource.
//!
//! The host fills [`InputState`] from whatever device it reads once per tick.
//! The animation core never inspects it; it is only forwarded to sprite
//! update routines, which decide what to play from it.
use bevy_ecs::prelude::*;

/// Actions a sprite update routine can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Left,
    Down,
    Right,
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Left,
        Action::Down,
        Action::Right,
        Action::Jump,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean key state with edge detection.
pub struct BoolState {
    /// Whether the action is held this tick.
    pub active: bool,
    /// Whether the action went down this tick.
    pub just_pressed: bool,
    /// Whether the action went up this tick.
    pub just_released: bool,
}

impl BoolState {
    fn set(&mut self, pressed: bool) {
        self.just_pressed = pressed && !self.active;
        self.just_released = !pressed && self.active;
        self.active = pressed;
    }
}

/// Resource capturing the per-tick state of every [`Action`].
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub up: BoolState,
    pub left: BoolState,
    pub down: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
}

impl InputState {
    pub fn state(&self, action: Action) -> &BoolState {
        match action {
            Action::Up => &self.up,
            Action::Left => &self.left,
            Action::Down => &self.down,
            Action::Right => &self.right,
            Action::Jump => &self.jump,
        }
    }

    fn state_mut(&mut self, action: Action) -> &mut BoolState {
        match action {
            Action::Up => &mut self.up,
            Action::Left => &mut self.left,
            Action::Down => &mut self.down,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
        }
    }

    /// Record whether `action` is held this tick, updating the edge flags.
    pub fn set(&mut self, action: Action, pressed: bool) {
        self.state_mut(action).set(pressed);
    }

    /// Record a full tick: held actions are listed, all others are released.
    pub fn apply(&mut self, held: &[Action]) {
        for action in Action::ALL {
            self.set(action, held.contains(&action));
        }
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.state(action).active
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.state(action).just_pressed
    }

    /// Whether any movement action is held.
    pub fn is_moving(&self) -> bool {
        self.up.active || self.left.active || self.down.active || self.right.active
    }
}
