/*
 * Configuration Module
 *
 * Startup settings loaded from a TOML file. Every section and field is
 * optional; anything left out falls back to the defaults below. The flock's
 * live tuning (sliders) is not persisted here.
 */

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::boid::BoidKind;
use crate::error::ConfigError;
use crate::params::SteeringConstants;
use crate::world::SpawnOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub fullscreen: bool,
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub show_fps: bool,
    /// Longest frame delta handed to the flock, in seconds. Stalls such as
    /// window drags would otherwise launch boids across the screen.
    pub max_frame_dt: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            width: 1200,
            height: 800,
            background: [0, 0, 0],
            show_fps: true,
            max_frame_dt: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub boid_count: usize,
    pub wrap: bool,
    pub base_speed: f32,
    pub fish: bool,
    pub seed: Option<u64>,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            boid_count: 200,
            wrap: false,
            base_speed: 150.0,
            fish: false,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub window: WindowConfig,
    pub flock: FlockConfig,
    pub steering: SteeringConstants,
}

impl SimConfig {
    /// Load from `path`. A missing file gives the defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flock.boid_count == 0 {
            return Err(ConfigError::EmptyFlock);
        }
        if !self.window.fullscreen {
            if self.window.width == 0 {
                return Err(ConfigError::NonPositive("window.width", 0.0));
            }
            if self.window.height == 0 {
                return Err(ConfigError::NonPositive("window.height", 0.0));
            }
        }
        if !(self.window.max_frame_dt > 0.0) {
            return Err(ConfigError::NonPositive("window.max_frame_dt", self.window.max_frame_dt));
        }
        if !(self.flock.base_speed >= 0.0) {
            return Err(ConfigError::Negative("flock.base_speed", self.flock.base_speed));
        }
        self.steering.validate()
    }

    pub fn spawn_options(&self) -> SpawnOptions {
        SpawnOptions {
            constants: self.steering,
            kind: if self.flock.fish { BoidKind::Fish } else { BoidKind::Bird },
            seed: self.flock.seed,
        }
    }
}
