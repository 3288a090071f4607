//! Game configuration
//!
//! Read-only constants supplied to the simulation at startup. Loaded from a
//! JSON file; any field left out falls back to the built-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::texture::TextureParams;

/// Errors raised while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ship ===
    pub ship_radius: f32,
    /// Degrees per second
    pub ship_turn_speed: f32,
    pub ship_acceleration: f32,
    /// Velocity retained per 1/60 s
    pub ship_friction: f32,
    pub lives: u8,
    pub invulnerability_secs: f32,

    // === Shots ===
    pub shot_radius: f32,
    pub shot_speed: f32,
    pub shot_cooldown: f32,

    // === Asteroids ===
    pub asteroid_min_radius: f32,
    pub asteroid_kinds: u32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Upper bound on live asteroids (0 = unlimited)
    pub max_asteroids: usize,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,

    // === Physics ===
    pub restitution: f32,

    // === Texture ===
    pub texture: TextureParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ship_radius: SHIP_RADIUS,
            ship_turn_speed: SHIP_TURN_SPEED,
            ship_acceleration: SHIP_ACCELERATION,
            ship_friction: SHIP_FRICTION,
            lives: SHIP_LIVES,
            invulnerability_secs: INVULNERABILITY_SECS,

            shot_radius: SHOT_RADIUS,
            shot_speed: SHOT_SPEED,
            shot_cooldown: SHOT_COOLDOWN,

            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_kinds: ASTEROID_KINDS,
            spawn_interval: ASTEROID_SPAWN_INTERVAL,
            max_asteroids: 0,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,

            restitution: RESTITUTION,

            texture: TextureParams::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("ship_radius", self.ship_radius)?;
        positive("shot_radius", self.shot_radius)?;
        positive("shot_speed", self.shot_speed)?;
        positive("asteroid_min_radius", self.asteroid_min_radius)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("asteroid_max_speed", self.asteroid_max_speed)?;

        if self.asteroid_kinds == 0 {
            return Err(ConfigError::Invalid {
                field: "asteroid_kinds",
                reason: "must be at least 1",
            });
        }
        if self.asteroid_max_radius() > ASTEROID_RADIUS_LIMIT {
            return Err(ConfigError::Invalid {
                field: "asteroid_min_radius",
                reason: "asteroid_min_radius * asteroid_kinds must not exceed 1024",
            });
        }
        if self.asteroid_min_speed < 0.0 || self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::Invalid {
                field: "asteroid_min_speed",
                reason: "must be within [0, asteroid_max_speed]",
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid {
                field: "restitution",
                reason: "must be within [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.ship_friction) {
            return Err(ConfigError::Invalid {
                field: "ship_friction",
                reason: "must be within [0, 1]",
            });
        }
        if self.lives == 0 {
            return Err(ConfigError::Invalid {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        self.texture.validate()
    }

    /// Largest radius the spawner can produce
    pub fn asteroid_max_radius(&self) -> f32 {
        self.asteroid_min_radius * self.asteroid_kinds as f32
    }

    /// Screen size as a vector
    pub fn screen_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width, self.screen_height)
    }
}
