//! Animation definition registry.
//!
//! This module keeps data-driven animation definitions that can be reused by
//! many sprites. A definition is immutable configuration only; every sprite
//! gets its own [`Animator`] with fresh playback state from
//! [`AnimationStore::build_animator`].
//!
//! # File format
//!
//! ```json
//! {
//!   "idle": {
//!     "start_frame": { "x": 0, "y": 0, "width": 32, "height": 32 },
//!     "frame_count": 5,
//!     "delay_ms": 150,
//!     "direction": "horizontal"
//!   }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::{Animation, Direction, Frame};
use crate::components::animator::{AnimationControl, Animator};
use crate::error::{AnimationError, StoreError};

/// Immutable description of one spritesheet animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDef {
    pub start_frame: Frame,
    pub frame_count: u32,
    /// Milliseconds between frame changes.
    pub delay_ms: u64,
    #[serde(default)]
    pub direction: Direction,
}

impl AnimationDef {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Build a fresh [`Animation`] from this definition.
    pub fn instantiate(&self) -> Result<Animation, AnimationError> {
        Animation::new(
            self.start_frame,
            self.frame_count,
            self.delay(),
            self.direction,
        )
    }
}

/// Central registry of animation definitions keyed by name.
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationDef>,
}

impl AnimationStore {
    /// Parse definitions from a JSON object keyed by animation name.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let animations: FxHashMap<String, AnimationDef> = serde_json::from_str(json)?;
        let store = Self { animations };
        store.validate()?;
        Ok(store)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&json)?;
        info!(
            "Loaded {} animation definitions from {:?}",
            store.animations.len(),
            path
        );
        Ok(store)
    }

    fn validate(&self) -> Result<(), StoreError> {
        for (key, def) in &self.animations {
            def.instantiate().map_err(|source| StoreError::Animation {
                key: key.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Add or replace a definition after validating it.
    pub fn insert(&mut self, key: impl Into<String>, def: AnimationDef) -> Result<(), StoreError> {
        let key = key.into();
        if let Err(source) = def.instantiate() {
            return Err(StoreError::Animation { key, source });
        }
        self.animations.insert(key, def);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AnimationDef> {
        self.animations.get(key)
    }

    /// Build an animator holding every stored animation.
    pub fn build_animator(&self) -> Result<Animator, StoreError> {
        let mut animator = Animator::new();
        for (key, def) in &self.animations {
            let wrap = |source: AnimationError| StoreError::Animation {
                key: key.clone(),
                source,
            };
            animator.add(key, def.instantiate().map_err(wrap)?).map_err(wrap)?;
        }
        Ok(animator)
    }
}
