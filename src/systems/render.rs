//! Draw command collection.
//!
//! Translates every [`Sprite`] into a [`DrawCommand`]: the active frame
//! rectangle plus the origin, scale/flip and position transform. Sprites
//! are emitted in entity order; layering is left to the backend.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::sprite::Sprite;
use crate::resources::drawqueue::{DrawCommand, DrawQueue};

/// Refill the [`DrawQueue`] for this tick.
pub fn collect_draw_commands(query: Query<(Entity, &Sprite)>, mut queue: ResMut<DrawQueue>) {
    queue.clear();
    for (entity, sprite) in query.iter() {
        let params = sprite.draw_params();
        trace!(
            "Draw {:?} '{}' src={:?} at {:?}",
            entity, sprite.texture.key, params.source, params.position
        );
        queue.push(DrawCommand {
            entity,
            texture: sprite.texture.key.clone(),
            params,
        });
    }
}
