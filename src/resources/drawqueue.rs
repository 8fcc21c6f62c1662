//! Draw commands handed to the rendering backend.
//!
//! The engine does not blit anything itself. Each tick the render system
//! fills [`DrawQueue`] and the host drains it with whatever backend it uses.
use bevy_ecs::prelude::{Entity, Resource};

use crate::components::sprite::DrawParams;

/// One sprite blit: a sub-rectangle of `texture` with its transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub entity: Entity,
    pub texture: String,
    pub params: DrawParams,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DrawQueue {
    pub commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Take every queued command, leaving the queue empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DrawCommand> {
        self.commands.drain(..)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
