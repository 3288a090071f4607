//! Astro Rocks entry point
//!
//! Runs the game headless: the autopilot flies the ship, frames are drawn
//! into a `RecordingSurface`, and a summary is logged at the end.
//!
//! Usage: `astro-rocks [seed] [frames] [config.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use astro_rocks::GameConfig;
use astro_rocks::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use astro_rocks::renderer::{RecordingSurface, draw_frame};
use astro_rocks::sim::{GameEvent, GameState, autopilot_input, tick};

const DEFAULT_FRAMES: u64 = 600;

/// Game instance holding all state
struct Game {
    state: GameState,
    surface: RecordingSurface,
    accumulator: f32,
    shots_fired: u64,
    rocks_broken: u64,
}

impl Game {
    fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            state: GameState::new(seed, config),
            surface: RecordingSurface::new(),
            accumulator: 0.0,
            shots_fired: 0,
            rocks_broken: 0,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot_input(&self.state);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &self.state.events {
                match event {
                    GameEvent::ShotFired { .. } => self.shots_fired += 1,
                    GameEvent::AsteroidSplit { .. } | GameEvent::AsteroidDestroyed { .. } => {
                        self.rocks_broken += 1
                    }
                    _ => {}
                }
            }
        }
    }

    fn render(&mut self) {
        draw_frame(&mut self.state, &mut self.surface);
    }
}

fn parse_arg<T: std::str::FromStr>(arg: Option<&String>, name: &str, default: T) -> T {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {} {:?}", name, raw);
            default
        }),
        None => default,
    }
}

fn load_config(path: Option<&String>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match GameConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config from {}: {}, using defaults", path, e);
            GameConfig::default()
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seed = parse_arg(args.first(), "seed", clock_seed);
    let frames = parse_arg(args.get(1), "frame count", DEFAULT_FRAMES);
    let config = load_config(args.get(2));

    log::info!("Astro Rocks starting (seed {}, {} frames)", seed, frames);
    let mut game = Game::new(seed, config);

    for _ in 0..frames {
        game.update(SIM_DT);
        game.render();
        if !game.state.running {
            break;
        }
    }

    let state = &game.state;
    log::info!(
        "Finished after {} frames: score {}, best {}, lives {}, {} asteroids on screen",
        game.surface.frames,
        state.score,
        state.best_score.max(state.score),
        state.lives,
        state.asteroids.len()
    );
    log::info!(
        "{} shots fired, {} asteroids broken",
        game.shots_fired,
        game.rocks_broken
    );
}
