//! Spritesheet animation engine.
//!
//! Tracks which frame of a spritesheet should be visible, advances frames on
//! a fixed cadence and hands the active frame rectangle plus a
//! position/scale/flip transform to a rendering backend.
//!
//! - [`components`] – animation strips, the animator registry and sprites
//! - [`resources`] – world time, input snapshot, animation definitions, config, draw queue
//! - [`systems`] – per-tick time, sprite update and draw collection
//! - [`game`] – the fox demo wiring used by the binary
//! - [`error`] – error types

pub mod components;
pub mod error;
pub mod game;
pub mod resources;
pub mod systems;
