//! Per-frame drawing: world, HUD and overlays

use glam::Vec2;

use super::{Surface, colors, shapes};
use crate::sim::entity::{EntityMut, Ship};
use crate::sim::state::{GamePhase, GameState};

const HUD_TEXT_SIZE: f32 = 36.0;
const POPUP_TEXT_SIZE: f32 = 48.0;
const POPUP_SIZE: Vec2 = Vec2::new(400.0, 300.0);
/// Ticks per on/off phase of the invulnerability blink
const BLINK_TICKS: u64 = 6;

/// Draw the whole frame.
///
/// Takes the state mutably because asteroid sprites are (re)composited
/// lazily here; nothing else is changed.
pub fn draw_frame<S: Surface>(state: &mut GameState, surface: &mut S) {
    surface.clear(colors::BACKGROUND);

    let blink_off = (state.time_ticks / BLINK_TICKS) % 2 == 1;
    for entity in state.entities_mut() {
        match entity {
            EntityMut::Ship(ship) => {
                if !(ship.is_invulnerable() && blink_off) {
                    draw_ship(ship, surface);
                }
            }
            EntityMut::Asteroid(asteroid) => {
                let sprite = asteroid.rotated_sprite();
                surface.blit(&sprite, asteroid.body.pos);
            }
            EntityMut::Projectile(shot) => {
                let points = shapes::circle(shot.body.pos, shot.body.radius, 8);
                surface.fill_polygon(&points, colors::SHOT);
            }
        }
    }

    draw_hud(state, surface);

    match state.phase {
        GamePhase::Paused => draw_paused(state, surface),
        GamePhase::GameOver => draw_game_over(state, surface),
        GamePhase::Playing => {}
    }
}

fn draw_ship<S: Surface>(ship: &Ship, surface: &mut S) {
    let hull = ship.triangle();
    surface.draw_polygon(&hull, colors::SHIP, 2.0);

    if ship.thrusting {
        let flame = shapes::flame(hull[1], hull[2], -ship.forward(), ship.body.radius * 0.8);
        surface.draw_polygon(&flame, colors::SHIP, 1.0);
    }
}

fn draw_hud<S: Surface>(state: &GameState, surface: &mut S) {
    surface.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 10.0),
        HUD_TEXT_SIZE,
        colors::HUD_TEXT,
    );
    surface.draw_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(10.0, 50.0),
        HUD_TEXT_SIZE,
        colors::HUD_TEXT,
    );
    if state.best_score > 0 {
        surface.draw_text(
            &format!("Best: {}", state.best_score),
            Vec2::new(10.0, 90.0),
            HUD_TEXT_SIZE,
            colors::HUD_TEXT,
        );
    }
}

fn draw_paused<S: Surface>(state: &GameState, surface: &mut S) {
    let screen = state.config.screen_size();
    surface.fill_polygon(&shapes::rect(Vec2::ZERO, screen), colors::OVERLAY);
    surface.draw_text(
        "Paused",
        screen / 2.0 - Vec2::new(60.0, 24.0),
        POPUP_TEXT_SIZE,
        colors::HUD_TEXT,
    );
}

fn draw_game_over<S: Surface>(state: &GameState, surface: &mut S) {
    let screen = state.config.screen_size();
    surface.fill_polygon(&shapes::rect(Vec2::ZERO, screen), colors::OVERLAY);

    let popup = (screen - POPUP_SIZE) / 2.0;
    let frame = shapes::rect(popup, POPUP_SIZE);
    surface.fill_polygon(&frame, colors::POPUP);
    surface.draw_polygon(&frame, colors::POPUP_BORDER, 2.0);

    let lines = [
        ("Game Over".to_string(), 50.0),
        (format!("Final Score: {}", state.score), 120.0),
        ("Press SPACE to continue".to_string(), 190.0),
        ("Press ESC to quit".to_string(), 240.0),
    ];
    for (text, y) in lines {
        surface.draw_text(
            &text,
            Vec2::new(popup.x + 30.0, popup.y + y),
            POPUP_TEXT_SIZE,
            colors::HUD_TEXT,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::{DrawCommand, RecordingSurface};

    fn quiet_state() -> GameState {
        GameState::new(
            4,
            GameConfig {
                spawn_interval: 1.0e6,
                ..GameConfig::default()
            },
        )
    }

    #[test]
    fn test_frame_draws_everything() {
        let mut state = quiet_state();
        state.spawn_asteroid(Vec2::new(100.0, 100.0), Vec2::ZERO, 40.0);
        state.spawn_asteroid(Vec2::new(900.0, 500.0), Vec2::ZERO, 20.0);
        state.fire();

        let mut surface = RecordingSurface::new();
        draw_frame(&mut state, &mut surface);

        assert_eq!(surface.commands[0], DrawCommand::Clear(colors::BACKGROUND));
        assert_eq!(surface.blit_count(), 2);
        let texts: Vec<&str> = surface.texts().collect();
        assert!(texts.contains(&"Score: 0"));
        assert!(texts.contains(&"Lives: 3"));
        assert!(
            surface
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Polygon { points, .. } if points.len() == 3))
        );
    }

    #[test]
    fn test_sprites_composited_once_across_frames() {
        let mut state = quiet_state();
        state.spawn_asteroid(Vec2::new(300.0, 300.0), Vec2::new(20.0, 0.0), 40.0);
        let mut surface = RecordingSurface::new();

        for _ in 0..5 {
            for asteroid in state.asteroids.iter_mut() {
                asteroid.advance(1.0 / 60.0);
            }
            draw_frame(&mut state, &mut surface);
        }

        assert_eq!(surface.frames, 5);
        assert_eq!(state.asteroids[0].sprite_builds(), 1);
    }

    #[test]
    fn test_invulnerable_ship_blinks() {
        let mut state = quiet_state();
        state.ship.invulnerable = 1.0;
        let hull_drawn = |surface: &RecordingSurface| {
            surface
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Polygon { points, .. } if points.len() == 3))
        };

        let mut surface = RecordingSurface::new();
        state.time_ticks = 0;
        draw_frame(&mut state, &mut surface);
        assert!(hull_drawn(&surface));

        state.time_ticks = BLINK_TICKS;
        draw_frame(&mut state, &mut surface);
        assert!(!hull_drawn(&surface));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = quiet_state();
        state.score = 1234;
        state.phase = GamePhase::GameOver;

        let mut surface = RecordingSurface::new();
        draw_frame(&mut state, &mut surface);

        let texts: Vec<&str> = surface.texts().collect();
        assert!(texts.contains(&"Game Over"));
        assert!(texts.contains(&"Final Score: 1234"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = quiet_state();
        state.phase = GamePhase::Paused;
        let mut surface = RecordingSurface::new();
        draw_frame(&mut state, &mut surface);
        assert!(surface.texts().any(|t| t == "Paused"));
    }
}
