//! Error types.
//!
//! All failures here are caller or configuration mistakes: they are local,
//! synchronous and never worth retrying.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`Animation`](crate::components::animation::Animation)
/// construction and by [`Animator`](crate::components::animator::Animator)
/// controls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The name is already registered; the existing entry was left untouched.
    #[error("animation '{0}' already exists in animator")]
    AlreadyExists(String),
    /// The name was never registered.
    #[error("animation '{0}' was not found")]
    NotFound(String),
    /// A control was used before any animation was played.
    #[error("no animation is active")]
    NoActiveAnimation,
    /// Construction parameters that cannot drive playback.
    #[error("invalid animation configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised while loading animation definitions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read animation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse animation definitions: {0}")]
    Json(#[from] serde_json::Error),
    #[error("animation definition '{key}' is invalid: {source}")]
    Animation {
        key: String,
        #[source]
        source: AnimationError,
    },
}

/// Errors raised while loading or saving the INI configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("failed to save config file {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
