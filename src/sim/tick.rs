//! Per-frame simulation step
//!
//! One call does input handling, whole-world update, spawning and culling,
//! then collision detection and response, in that fixed order.

use glam::Vec2;

use super::collision::{circles_overlap, resolve_elastic};
use super::spawner::is_lost;
use super::state::{GameEvent, GamePhase, GameState};

/// Key states for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_reverse: bool,
    /// Fire (held; the ship's cooldown limits the rate)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new round after game over
    pub restart: bool,
    /// Leave the game loop
    pub quit: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    state.events.clear();

    if input.quit {
        log::info!("Quit requested (score {})", state.score);
        state.running = false;
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase == GamePhase::GameOver && input.restart {
        state.reset();
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    steer_ship(state, input, dt);
    if input.fire {
        state.fire();
    }

    let screen = state.config.screen_size();
    for mut entity in state.entities_mut() {
        entity.advance(dt, screen);
    }
    state.projectiles.retain(|p| !p.is_off_screen(screen));

    state.update_field(dt);

    let margin = state.config.asteroid_max_radius() * 2.0;
    state
        .asteroids
        .retain(|a| !is_lost(a.body.pos, a.body.vel, screen, margin));

    ship_asteroid_collisions(state);
    projectile_asteroid_collisions(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

fn steer_ship(state: &mut GameState, input: &FrameInput, dt: f32) {
    let turn_speed = state.config.ship_turn_speed;
    let acceleration = state.config.ship_acceleration;
    let ship = &mut state.ship;
    ship.thrusting = input.thrust_forward;

    if input.rotate_left {
        ship.rotate(-1.0, turn_speed, dt);
    }
    if input.rotate_right {
        ship.rotate(1.0, turn_speed, dt);
    }
    if input.thrust_forward {
        ship.thrust(1.0, acceleration, dt);
    }
    if input.thrust_reverse {
        ship.thrust(-1.0, acceleration, dt);
    }
}

/// Bounce the ship off every touching asteroid; a vulnerable ship loses a life
fn ship_asteroid_collisions(state: &mut GameState) {
    let restitution = state.config.restitution;
    let mut hit = false;

    for asteroid in state.asteroids.iter_mut() {
        if circles_overlap(&state.ship.body, &asteroid.body) {
            resolve_elastic(&mut state.ship.body, &mut asteroid.body, restitution);
            hit = true;
        }
    }

    if !hit || state.ship.is_invulnerable() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.ship.invulnerable = state.config.invulnerability_secs;
    log::info!("Ship hit, {} lives left", state.lives);
    state.events.push(GameEvent::ShipHit {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.best_score = state.best_score.max(state.score);
        log::info!("Game over, final score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
    }
}

/// Each projectile can break at most one asteroid, and each asteroid breaks once
fn projectile_asteroid_collisions(state: &mut GameState) {
    let mut spent: Vec<u32> = Vec::new();
    let mut hit: Vec<usize> = Vec::new();

    for (index, asteroid) in state.asteroids.iter().enumerate() {
        let shot = state
            .projectiles
            .iter()
            .find(|p| !spent.contains(&p.id) && circles_overlap(&p.body, &asteroid.body));
        if let Some(shot) = shot {
            spent.push(shot.id);
            hit.push(index);
        }
    }

    if hit.is_empty() {
        return;
    }
    state.projectiles.retain(|p| !spent.contains(&p.id));

    // Highest index first so earlier indices stay valid while removing
    for &index in hit.iter().rev() {
        let points = state.points_for_radius(state.asteroids[index].body.radius);
        state.score += points;
        state.split_asteroid(index);
    }
}

/// Simple autopilot for demo/headless runs: turn toward the nearest asteroid
/// and fire once roughly lined up. Restarts automatically after game over.
pub fn autopilot_input(state: &GameState) -> FrameInput {
    let mut input = FrameInput::default();
    if state.phase == GamePhase::GameOver {
        input.restart = true;
        return input;
    }

    let ship_pos = state.ship.body.pos;
    let nearest = state.asteroids.iter().min_by(|a, b| {
        a.body
            .pos
            .distance_squared(ship_pos)
            .partial_cmp(&b.body.pos.distance_squared(ship_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(target) = nearest else {
        return input;
    };

    let to_target: Vec2 = target.body.pos - ship_pos;
    // Signed angle from facing to target; positive means clockwise on screen
    let error = state.ship.forward().angle_to(to_target);
    if error > 0.05 {
        input.rotate_right = true;
    } else if error < -0.05 {
        input.rotate_left = true;
    }
    input.fire = error.abs() < 0.2;

    // Back off from anything too close
    let danger = target.body.radius + state.ship.body.radius + 60.0;
    if to_target.length() < danger {
        input.thrust_reverse = true;
    }

    input
}
