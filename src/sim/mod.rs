//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod compositor;
pub mod entity;
pub mod shape;
pub mod spawner;
pub mod state;
pub mod texture;
pub mod tick;

pub use collision::{Body, ContactResolution, circles_overlap, collision_normal, resolve_elastic};
pub use compositor::{DeformedSprite, composite};
pub use entity::{Asteroid, EntityMut, Fragment, Projectile, Ship, SplitOutcome};
pub use shape::ControlPoints;
pub use spawner::AsteroidField;
pub use state::{GameEvent, GamePhase, GameState};
pub use texture::{EdgeFalloff, Image, Rgba, TextureParams, synthesize_texture};
pub use tick::{FrameInput, autopilot_input, tick};
