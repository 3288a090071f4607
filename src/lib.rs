//! Astro Rocks - an Asteroids-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, textures, collisions, game state)
//! - `renderer`: Frame drawing against an abstract `Surface`
//! - `config`: Data-driven game constants

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the frame cap)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen defaults
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 20.0;
    pub const SHIP_TURN_SPEED: f32 = 180.0; // degrees per second
    pub const SHIP_ACCELERATION: f32 = 200.0; // pixels/s²
    /// Velocity retained per 1/60 s
    pub const SHIP_FRICTION: f32 = 0.99;
    pub const SHIP_LIVES: u8 = 3;
    pub const INVULNERABILITY_SECS: f32 = 1.5;

    /// Projectile defaults
    pub const SHOT_RADIUS: f32 = 5.0;
    pub const SHOT_SPEED: f32 = 500.0;
    pub const SHOT_COOLDOWN: f32 = 0.3;

    /// Asteroid defaults
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_SPAWN_INTERVAL: f32 = 0.8;
    pub const ASTEROID_MIN_SPEED: f32 = 40.0;
    pub const ASTEROID_MAX_SPEED: f32 = 100.0;
    /// Spawn heading jitter (degrees either side of the inward edge direction)
    pub const ASTEROID_SPAWN_JITTER: f32 = 30.0;
    pub const ASTEROID_MAX_SPIN: f32 = 30.0; // degrees per second
    /// Upper bound on any configured asteroid radius; keeps sprite buffers small
    pub const ASTEROID_RADIUS_LIMIT: f32 = 1024.0;

    /// Split physics
    pub const SPLIT_MIN_ANGLE: f32 = 20.0; // degrees
    pub const SPLIT_MAX_ANGLE: f32 = 50.0; // degrees
    pub const SPLIT_SPEEDUP: f32 = 1.2;

    /// Collision restitution (1.0 = perfectly elastic, 0.0 = fully inelastic)
    pub const RESTITUTION: f32 = 0.8;
}

/// Offset at distance `r` and angle `theta` (radians from +x, y-down screen)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::from_angle(theta) * r
}

/// Distance and angle of an offset, the inverse of [`polar_to_cartesian`].
///
/// The angle is in (-π, π]; a zero offset gives angle 0.
#[inline]
pub fn cartesian_to_polar(offset: Vec2) -> (f32, f32) {
    (offset.length(), offset.y.atan2(offset.x))
}

/// Unit vector a ship/projectile travels along for a heading in radians.
///
/// Heading 0 points up the screen (negative y); positive headings turn clockwise.
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Wrap a position onto the screen torus
#[inline]
pub fn wrap_position(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(pos.x.rem_euclid(size.x), pos.y.rem_euclid(size.y))
}
