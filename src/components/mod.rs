//! ECS components and the animation core.
//!
//! - [`animation`] – one spritesheet strip and its playback cursor
//! - [`animator`] – named animation registry with play/pause/reset controls
//! - [`sprite`] – drawable entity coupling a texture, an animator and a transform

pub mod animation;
pub mod animator;
pub mod sprite;
