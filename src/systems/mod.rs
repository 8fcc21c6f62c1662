//! Engine systems.
//!
//! Submodules overview
//! - [`render`] – turn sprites into draw commands
//! - [`sprite`] – run sprite update routines
//! - [`time`] – update simulation time and delta

pub mod render;
pub mod sprite;
pub mod time;
