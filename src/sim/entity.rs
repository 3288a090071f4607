//! Game entities: the ship, asteroids and projectiles
//!
//! The entity set is closed, so shared behaviour (per-frame motion, drawing)
//! is dispatched by matching on `EntityMut` rather than through trait objects.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::collision::Body;
use super::compositor::DeformedSprite;
use super::shape::{CONTROL_POINTS, ControlPoints};
use super::texture::{Image, TextureParams, synthesize_texture};
use crate::config::GameConfig;
use crate::consts::*;
use crate::{heading_to_dir, wrap_position};

/// Size tier of a rock of `radius`, counting in steps of `min_radius`
pub fn size_tier(radius: f32, min_radius: f32) -> u32 {
    (radius / min_radius).ceil().max(1.0) as u32
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    /// Facing in radians (0 = up the screen, clockwise positive)
    pub heading: f32,
    /// Velocity retained per 1/60 s
    pub friction: f32,
    /// Seconds until the next shot is allowed
    pub shot_timer: f32,
    /// Seconds of remaining post-hit invulnerability
    pub invulnerable: f32,
    /// Forward thrust held this frame (drawn as exhaust)
    pub thrusting: bool,
}

impl Ship {
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, config.ship_radius),
            heading: 0.0,
            friction: config.ship_friction,
            shot_timer: 0.0,
            invulnerable: 0.0,
            thrusting: false,
        }
    }

    /// Unit vector the nose points along
    pub fn forward(&self) -> Vec2 {
        heading_to_dir(self.heading)
    }

    /// Turn by `direction` (-1 left, 1 right) at `turn_speed` degrees per second
    pub fn rotate(&mut self, direction: f32, turn_speed: f32, dt: f32) {
        self.heading = (self.heading + (turn_speed * direction * dt).to_radians()).rem_euclid(TAU);
    }

    /// Accelerate along the facing (`direction` -1 for reverse thrust)
    pub fn thrust(&mut self, direction: f32, acceleration: f32, dt: f32) {
        self.body.vel += self.forward() * acceleration * direction * dt;
    }

    pub fn can_fire(&self) -> bool {
        self.shot_timer <= 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Launch a projectile from the nose and start the cooldown
    pub fn fire(&mut self, id: u32, config: &GameConfig) -> Projectile {
        self.shot_timer = config.shot_cooldown;
        let dir = self.forward();
        Projectile::new(
            id,
            self.body.pos + dir * self.body.radius,
            dir * config.shot_speed,
            config.shot_radius,
        )
    }

    /// Friction, motion, screen wrap and timers
    pub fn advance(&mut self, dt: f32, screen: Vec2) {
        self.body.vel *= self.friction.powf(dt * 60.0);
        self.body.integrate(dt);
        self.body.pos = wrap_position(self.body.pos, screen);
        self.shot_timer = (self.shot_timer - dt).max(0.0);
        self.invulnerable = (self.invulnerable - dt).max(0.0);
    }

    /// Hull outline: nose, then the two rear corners
    pub fn triangle(&self) -> [Vec2; 3] {
        let forward = self.forward();
        let right = forward.perp() * self.body.radius / 1.5;
        let pos = self.body.pos;
        let r = self.body.radius;
        [
            pos + forward * r,
            pos - forward * r - right,
            pos - forward * r + right,
        ]
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            body: Body::new(pos, vel, radius),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.body.integrate(dt);
    }

    /// Past any screen edge
    pub fn is_off_screen(&self, screen: Vec2) -> bool {
        let p = self.body.pos;
        p.x < 0.0 || p.y < 0.0 || p.x > screen.x || p.y > screen.y
    }
}

/// Where a child asteroid starts after a split
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Result of hitting an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitOutcome {
    /// Too small to break up further
    Destroyed,
    /// Replaced by two smaller fragments
    Split([Fragment; 2]),
}

/// A procedurally shaped, textured rock
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub body: Body,
    pub control: ControlPoints,
    /// Radians, clockwise on screen
    pub rotation: f32,
    /// Radians per second
    pub spin: f32,
    pub texture_seed: u32,
    texture: Image,
    sprite: DeformedSprite,
}

impl Asteroid {
    /// New asteroid with a random outline, spin and surface texture
    pub fn new<R: Rng>(
        id: u32,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        rng: &mut R,
        params: &TextureParams,
    ) -> Self {
        let control = ControlPoints::random(rng, CONTROL_POINTS);
        let texture_seed = rng.random_range(1..=1000);
        let rotation = rng.random_range(0.0..360.0f32).to_radians();
        let spin = rng
            .random_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN)
            .to_radians();
        Self::with_shape(id, Body::new(pos, vel, radius), control, texture_seed, params)
            .with_spin(rotation, spin)
    }

    /// Asteroid with an explicit outline and texture seed, not spinning
    pub fn with_shape(
        id: u32,
        body: Body,
        control: ControlPoints,
        texture_seed: u32,
        params: &TextureParams,
    ) -> Self {
        Self {
            id,
            texture: synthesize_texture(body.radius, texture_seed, params),
            body,
            control,
            rotation: 0.0,
            spin: 0.0,
            texture_seed,
            sprite: DeformedSprite::new(),
        }
    }

    pub fn with_spin(mut self, rotation: f32, spin: f32) -> Self {
        self.rotation = rotation;
        self.spin = spin;
        self
    }

    pub fn advance(&mut self, dt: f32) {
        self.body.integrate(dt);
        self.rotation = (self.rotation + self.spin * dt).rem_euclid(TAU);
    }

    pub fn texture(&self) -> &Image {
        &self.texture
    }

    /// Unrotated warped sprite, composited only when the outline changed
    pub fn sprite(&mut self) -> &Image {
        self.sprite
            .get_or_build(&self.texture, self.body.radius, &self.control)
            .0
    }

    /// Sprite turned to the current rotation, ready to blit at `body.pos`
    pub fn rotated_sprite(&mut self) -> Image {
        let rotation = self.rotation;
        self.sprite().rotated(rotation)
    }

    /// Times the sprite has been composited
    pub fn sprite_builds(&self) -> u32 {
        self.sprite.builds()
    }

    /// Size tier: 1 for the smallest rocks
    pub fn tier(&self, min_radius: f32) -> u32 {
        size_tier(self.body.radius, min_radius)
    }

    /// Break apart on a hit.
    ///
    /// At or below `min_radius` the rock is simply destroyed. Otherwise two
    /// fragments `min_radius` smaller start at the same spot, their headings
    /// turned ±(20°..50°) from the parent's and sped up by 1.2×.
    pub fn split<R: Rng>(&self, rng: &mut R, min_radius: f32) -> SplitOutcome {
        if self.body.radius <= min_radius {
            return SplitOutcome::Destroyed;
        }

        let angle = rng
            .random_range(SPLIT_MIN_ANGLE..=SPLIT_MAX_ANGLE)
            .to_radians();
        let radius = self.body.radius - min_radius;
        let fragment = |turn: f32| Fragment {
            pos: self.body.pos,
            vel: Vec2::from_angle(turn).rotate(self.body.vel) * SPLIT_SPEEDUP,
            radius,
        };

        SplitOutcome::Split([fragment(angle), fragment(-angle)])
    }
}

/// Mutable view of any entity, used by the update and draw passes
#[derive(Debug)]
pub enum EntityMut<'a> {
    Ship(&'a mut Ship),
    Asteroid(&'a mut Asteroid),
    Projectile(&'a mut Projectile),
}

impl EntityMut<'_> {
    /// One frame of motion under the entity's own rule
    pub fn advance(&mut self, dt: f32, screen: Vec2) {
        match self {
            EntityMut::Ship(ship) => ship.advance(dt, screen),
            EntityMut::Asteroid(asteroid) => asteroid.advance(dt),
            EntityMut::Projectile(projectile) => projectile.advance(dt),
        }
    }
}
