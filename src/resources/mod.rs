//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – animation definitions reused across sprites
//! - `drawqueue` – draw commands for the rendering backend
//! - `gameconfig` – INI-backed engine and demo settings
//! - `input` – per-tick action state forwarded to sprite routines
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod drawqueue;
pub mod gameconfig;
pub mod input;
pub mod worldtime;
