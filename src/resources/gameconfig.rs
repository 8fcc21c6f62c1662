//! Engine configuration resource.
//!
//! Settings loaded from an INI file. Missing keys keep their defaults so a
//! partial or absent file still yields a usable configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! tick_ms = 16
//! time_scale = 1.0
//!
//! [demo]
//! ticks = 600
//! seed = 42
//! animations = ./assets/fox.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::ConfigError;

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_ANIMATIONS_PATH: &str = "./assets/fox.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed simulated tick length in milliseconds.
    pub tick_ms: u64,
    /// Multiplier applied to every tick delta.
    pub time_scale: f32,
    /// Number of ticks the demo runs for.
    pub ticks: u64,
    /// Seed for the demo's scripted input.
    pub seed: u64,
    /// Path to the JSON animation definitions.
    pub animations_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            time_scale: DEFAULT_TIME_SCALE,
            ticks: DEFAULT_TICKS,
            seed: DEFAULT_SEED,
            animations_path: PathBuf::from(DEFAULT_ANIMATIONS_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&config);

        info!(
            "Loaded config: tick={}ms, time_scale={}, ticks={}, seed={}, animations={:?}",
            self.tick_ms, self.time_scale, self.ticks, self.seed, self.animations_path
        );
        Ok(())
    }

    /// Load values from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(|reason| ConfigError::Load {
            path: self.config_path.clone(),
            reason,
        })?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [time] section
        if let Some(tick_ms) = config.getuint("time", "tick_ms").ok().flatten() {
            self.tick_ms = tick_ms;
        }
        if let Some(scale) = config.getfloat("time", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }

        // [demo] section
        if let Some(ticks) = config.getuint("demo", "ticks").ok().flatten() {
            self.ticks = ticks;
        }
        if let Some(seed) = config.getuint("demo", "seed").ok().flatten() {
            self.seed = seed;
        }
        if let Some(path) = config.get("demo", "animations") {
            self.animations_path = PathBuf::from(path);
        }
    }

    /// Save configuration to the INI file, creating it if needed.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("time", "tick_ms", Some(self.tick_ms.to_string()));
        config.set("time", "time_scale", Some(self.time_scale.to_string()));

        config.set("demo", "ticks", Some(self.ticks.to_string()));
        config.set("demo", "seed", Some(self.seed.to_string()));
        config.set(
            "demo",
            "animations",
            Some(self.animations_path.display().to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|source| ConfigError::Save {
                path: self.config_path.clone(),
                source,
            })?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Tick length in seconds, as fed to the time system.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}
