//! End-to-end scenarios over the public API

use astro_rocks::consts::SIM_DT;
use astro_rocks::renderer::{RecordingSurface, draw_frame};
use astro_rocks::sim::{
    Asteroid, Body, ControlPoints, FrameInput, GamePhase, GameState, Ship, TextureParams,
    autopilot_input, circles_overlap, composite, resolve_elastic, synthesize_texture, tick,
};
use astro_rocks::{ConfigError, GameConfig};
use glam::Vec2;

#[test]
fn resting_ship_and_asteroid_are_pushed_apart() {
    let config = GameConfig {
        ship_radius: 15.0,
        ..GameConfig::default()
    };
    let mut ship = Ship::new(Vec2::new(100.0, 100.0), &config);
    let mut rock = Asteroid::with_shape(
        1,
        Body::new(Vec2::new(110.0, 100.0), Vec2::ZERO, 20.0),
        ControlPoints::from_values(&[1.0; 8]),
        42,
        &TextureParams::default(),
    );

    assert!(circles_overlap(&ship.body, &rock.body));
    let contact = resolve_elastic(&mut ship.body, &mut rock.body, config.restitution);

    assert!((contact.overlap - 25.0).abs() < 1e-4);
    assert!((ship.body.pos.x - 87.5).abs() < 1e-4);
    assert!((rock.body.pos.x - 122.5).abs() < 1e-4);
    assert_eq!(ship.body.pos.y, 100.0);
    assert_eq!(ship.body.vel, Vec2::ZERO);
    assert_eq!(rock.body.vel, Vec2::ZERO);
}

#[test]
fn unit_control_points_give_a_circle() {
    let control = ControlPoints::from_values(&[1.0; 8]);
    let center = Vec2::new(50.0, 50.0);
    let outline = control.silhouette(center, 30.0, 0.7, 32);

    assert_eq!(outline.len(), 32);
    for point in outline {
        assert!((point.distance(center) - 30.0).abs() < 1e-3);
    }
}

#[test]
fn circular_outline_keeps_texture_footprint() {
    let params = TextureParams::default();
    let texture = synthesize_texture(30.0, 9, &params);
    let control = ControlPoints::from_values(&[1.0; 8]);
    let sprite = composite(&texture, 30.0, &control);

    // Buffer grows by the headroom factor, the covered disc does not
    assert_eq!(sprite.width(), 72);
    let covered = sprite.opaque_pixel_count();
    let source = texture.opaque_pixel_count();
    let ratio = covered as f32 / source as f32;
    assert!((0.9..1.1).contains(&ratio), "coverage ratio {}", ratio);
}

#[test]
fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("astro-rocks-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "lives": 5, "restitution": 0.5 }"#).unwrap();

    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.lives, 5);
    assert_eq!(config.restitution, 0.5);
    assert_eq!(config.ship_radius, GameConfig::default().ship_radius);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let result = GameConfig::load("/nonexistent/astro-rocks.json");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn autopilot_session_stays_consistent() {
    let mut state = GameState::new(2024, GameConfig::default());
    let mut surface = RecordingSurface::new();
    let screen = state.config.screen_size();

    for _ in 0..1800 {
        let input = autopilot_input(&state);
        tick(&mut state, &input, SIM_DT);
        draw_frame(&mut state, &mut surface);

        assert!(state.asteroids.windows(2).all(|w| w[0].id < w[1].id));
        assert!(state.projectiles.iter().all(|p| {
            let pos = p.body.pos;
            pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= screen.x && pos.y <= screen.y
        }));
        assert!(state.ship.body.pos.x >= 0.0 && state.ship.body.pos.x <= screen.x);
        assert!(state.ship.body.pos.y >= 0.0 && state.ship.body.pos.y <= screen.y);
        assert_eq!(surface.blit_count(), state.asteroids.len());
    }

    assert_eq!(surface.frames, 1800);
    assert!(state.asteroids.iter().all(|a| a.sprite_builds() <= 1));
}

#[test]
fn pause_freezes_the_world() {
    let mut state = GameState::new(8, GameConfig::default());
    for _ in 0..120 {
        tick(&mut state, &FrameInput::default(), SIM_DT);
    }
    let pause = FrameInput {
        pause: true,
        ..Default::default()
    };
    tick(&mut state, &pause, SIM_DT);
    assert_eq!(state.phase, GamePhase::Paused);

    let positions: Vec<Vec2> = state.asteroids.iter().map(|a| a.body.pos).collect();
    for _ in 0..30 {
        tick(&mut state, &FrameInput::default(), SIM_DT);
    }
    let after: Vec<Vec2> = state.asteroids.iter().map(|a| a.body.pos).collect();
    assert_eq!(positions, after);
}
