//! Game state and core simulation types
//!
//! The world owns one collection per entity kind. Cross-cutting passes (update,
//! draw) walk composed views over those collections instead of keeping extra
//! registries, so every entity lives in exactly one place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Asteroid, EntityMut, Projectile, Ship, SplitOutcome, size_tier};
use super::spawner::AsteroidField;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives, waiting for restart or quit
    GameOver,
}

/// Things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired { id: u32 },
    AsteroidSpawned { id: u32, radius: f32 },
    AsteroidSplit { id: u32, children: [u32; 2] },
    AsteroidDestroyed { id: u32 },
    ShipHit { lives_left: u8 },
    GameOver { score: u64 },
}

/// Points for destroying or splitting an asteroid of the given size tier
pub fn points_for_tier(tier: u32) -> u64 {
    match tier {
        0 | 1 => 100,
        2 => 50,
        _ => 20,
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Cleared by the quit signal
    pub running: bool,
    pub score: u64,
    /// Best score this session (survives restarts)
    pub best_score: u64,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    /// Active asteroids (sorted by id for determinism)
    pub asteroids: Vec<Asteroid>,
    /// Active projectiles (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    pub field: AsteroidField,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let ship = Ship::new(config.screen_size() / 2.0, &config);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Playing,
            running: true,
            score: 0,
            best_score: 0,
            lives: config.lives,
            time_ticks: 0,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            field: AsteroidField::new(),
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Start a fresh round: new ship, empty field, score and lives reset
    pub fn reset(&mut self) {
        self.best_score = self.best_score.max(self.score);
        self.score = 0;
        self.lives = self.config.lives;
        self.ship = Ship::new(self.config.screen_size() / 2.0, &self.config);
        self.asteroids.clear();
        self.projectiles.clear();
        self.field = AsteroidField::new();
        self.phase = GamePhase::Playing;
        log::info!("New round (best score {})", self.best_score);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The run's random stream
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Add an asteroid with a fresh random outline and texture
    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        let asteroid = Asteroid::new(id, pos, vel, radius, &mut self.rng, &self.config.texture);
        log::debug!("Spawned asteroid {} (r={:.0}) at {:?}", id, radius, pos);
        self.asteroids.push(asteroid);
        id
    }

    /// Run the asteroid field timer, spawning when it fires
    pub fn update_field(&mut self, dt: f32) -> Option<u32> {
        let live = self.asteroids.len();
        let request = self.field.update(dt, &mut self.rng, &self.config, live)?;
        let id = self.spawn_asteroid(request.pos, request.vel, request.radius);
        self.events.push(GameEvent::AsteroidSpawned {
            id,
            radius: request.radius,
        });
        Some(id)
    }

    /// Fire from the ship if the cooldown allows
    pub fn fire(&mut self) -> Option<u32> {
        if !self.ship.can_fire() {
            return None;
        }
        let id = self.next_entity_id();
        let shot = self.ship.fire(id, &self.config);
        self.projectiles.push(shot);
        self.events.push(GameEvent::ShotFired { id });
        Some(id)
    }

    /// Break up the asteroid at `index`, removing it from the field.
    ///
    /// Returns the number of fragments spawned in its place (0 or 2).
    pub fn split_asteroid(&mut self, index: usize) -> usize {
        if index >= self.asteroids.len() {
            return 0;
        }
        let parent = self.asteroids.remove(index);
        match parent.split(&mut self.rng, self.config.asteroid_min_radius) {
            SplitOutcome::Destroyed => {
                log::debug!("Asteroid {} destroyed", parent.id);
                self.events.push(GameEvent::AsteroidDestroyed { id: parent.id });
                0
            }
            SplitOutcome::Split(fragments) => {
                let children = fragments.map(|f| self.spawn_asteroid(f.pos, f.vel, f.radius));
                log::debug!("Asteroid {} split into {:?}", parent.id, children);
                self.events.push(GameEvent::AsteroidSplit {
                    id: parent.id,
                    children,
                });
                2
            }
        }
    }

    /// Points awarded for hitting an asteroid of `radius`
    pub fn points_for_radius(&self, radius: f32) -> u64 {
        points_for_tier(size_tier(radius, self.config.asteroid_min_radius))
    }

    /// Every entity: ship first, then asteroids, then projectiles.
    ///
    /// Both the update and the draw pass walk this view.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = EntityMut<'_>> {
        std::iter::once(EntityMut::Ship(&mut self.ship))
            .chain(self.asteroids.iter_mut().map(EntityMut::Asteroid))
            .chain(self.projectiles.iter_mut().map(EntityMut::Projectile))
    }

    pub fn asteroid(&self, id: u32) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.asteroids.sort_by_key(|a| a.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
