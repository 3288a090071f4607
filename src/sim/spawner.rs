//! Asteroid field: periodic spawning from the screen edges

use glam::Vec2;
use rand::Rng;

use crate::config::GameConfig;
use crate::consts::ASTEROID_SPAWN_JITTER;

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Direction pointing onto the screen from this edge
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }

    /// Point `margin` outside this edge, `along` (0..1) of the way down/across it
    pub fn position(self, along: f32, margin: f32, screen: Vec2) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-margin, along * screen.y),
            Edge::Right => Vec2::new(screen.x + margin, along * screen.y),
            Edge::Top => Vec2::new(along * screen.x, -margin),
            Edge::Bottom => Vec2::new(along * screen.x, screen.y + margin),
        }
    }
}

/// An asteroid the field wants created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub edge: Edge,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Timer-driven asteroid source
#[derive(Debug, Clone, Default)]
pub struct AsteroidField {
    timer: f32,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spawn timer; returns a request each time the interval elapses.
    ///
    /// Time past the interval carries into the next one, so the spawn rate does
    /// not drift with the tick length. A spawn due while `live` is at the
    /// configured cap is skipped.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        rng: &mut R,
        config: &GameConfig,
        live: usize,
    ) -> Option<SpawnRequest> {
        self.timer += dt;
        if self.timer < config.spawn_interval {
            return None;
        }
        self.timer -= config.spawn_interval;

        if config.max_asteroids > 0 && live >= config.max_asteroids {
            return None;
        }

        Some(Self::roll(rng, config))
    }

    /// Pick edge, speed, heading and size for a new asteroid
    pub fn roll<R: Rng>(rng: &mut R, config: &GameConfig) -> SpawnRequest {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let speed = rng.random_range(config.asteroid_min_speed..=config.asteroid_max_speed);
        let jitter = rng
            .random_range(-ASTEROID_SPAWN_JITTER..=ASTEROID_SPAWN_JITTER)
            .to_radians();
        let vel = Vec2::from_angle(jitter).rotate(edge.inward() * speed);
        let pos = edge.position(
            rng.random_range(0.0..=1.0),
            config.asteroid_max_radius(),
            config.screen_size(),
        );
        let kind = rng.random_range(1..=config.asteroid_kinds);

        SpawnRequest {
            edge,
            pos,
            vel,
            radius: config.asteroid_min_radius * kind as f32,
        }
    }
}

/// True once an asteroid has drifted well off screen and keeps heading away
pub fn is_lost(pos: Vec2, vel: Vec2, screen: Vec2, margin: f32) -> bool {
    let outside = pos.x < -margin
        || pos.y < -margin
        || pos.x > screen.x + margin
        || pos.y > screen.y + margin;
    outside && vel.dot(pos - screen / 2.0) > 0.0
}
