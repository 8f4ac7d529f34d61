//! Rowing Runner headless driver
//!
//! Runs the simulation against a scripted rower and the reference point-mass
//! boat, logging what a real host would render.
//!
//! Usage: `rowing-runner [tuning.json] [seconds]`

use rowing_runner::consts::*;
use rowing_runner::hud::HudFrame;
use rowing_runner::platform::{KinematicBody, RigidBody, ScriptedSensor, SensorSource};
use rowing_runner::sim::{GameEvent, GameState, TickInput, tick};
use rowing_runner::{HighScoreStore, JsonFileHighScores, Tuning};

const HIGH_SCORE_PATH: &str = "rowing-runner-highscore.json";
/// Host frame time; the simulation substeps at SIM_DT inside it
const FRAME_DT: f32 = 1.0 / 30.0;

/// Driver instance holding all state
struct Game {
    state: GameState,
    body: KinematicBody,
    sensor: ScriptedSensor,
    scores: JsonFileHighScores,
    accumulator: f32,
    last_hud: Option<HudFrame>,
}

impl Game {
    fn new(tuning: Tuning, seed: u64, scores: JsonFileHighScores) -> Self {
        let mut sensor = ScriptedSensor::new(0.15, 0.5, 0.2);
        // Tire after a minute so the danger zone gets its chance
        sensor.stop_after = Some(60.0);
        Self {
            state: GameState::with_tuning(tuning, seed),
            body: KinematicBody::default(),
            sensor,
            scores,
            accumulator: 0.0,
            last_hud: None,
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn step(&mut self) {
        let mut collisions = Vec::new();
        if self.state.lifecycle.is_active()
            && self.body.touches_boundary(self.state.pursuit.state.boundary_x)
        {
            collisions.push(DANGER_ZONE_TAG.to_string());
        }

        let input = TickInput {
            sensor_reading: self.sensor.read(self.state.time),
            body: self.body.report(),
            collisions,
            ..Default::default()
        };
        tick(&mut self.state, &input, SIM_DT, &mut self.scores);

        self.body.apply_events(&self.state.events);
        self.body.integrate(SIM_DT);

        for event in &self.state.events {
            match event {
                GameEvent::HudVisible(false) => {
                    if let Err(e) = self.scores.save() {
                        log::warn!("Could not save high score: {}", e);
                    }
                }
                GameEvent::EndPanel(true) => log::info!("Showing end panel"),
                GameEvent::WorldReloaded => log::info!("World reloaded"),
                GameEvent::WorldExtended { tile_id } => {
                    let live = self.state.world.obstacles().len();
                    log::debug!("Tile {} spawned, {} rocks live", tile_id, live);
                }
                _ => {}
            }
        }
    }

    /// Log the HUD whenever its text changes (once a second at most)
    fn render(&mut self) {
        let frame = HudFrame::from_state(&self.state, self.scores.get_high_score());
        let changed = self
            .last_hud
            .as_ref()
            .is_none_or(|last| last.time != frame.time || last.visible != frame.visible);
        if changed {
            if frame.visible {
                log::info!("{}  best {}  {}", frame.time, frame.high_score, frame.velocity);
            }
            self.last_hud = Some(frame);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rowing Runner (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let tuning = match args.get(1) {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seconds: f32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(90.0);

    let scores = JsonFileHighScores::open(HIGH_SCORE_PATH).unwrap_or_else(|e| {
        log::warn!("Ignoring high score file: {}", e);
        JsonFileHighScores::new(HIGH_SCORE_PATH)
    });

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut game = Game::new(tuning, seed, scores);
    let frames = (seconds / FRAME_DT).ceil() as u32;
    for _ in 0..frames {
        game.update(FRAME_DT);
        game.render();
    }

    if let Err(e) = game.scores.save() {
        log::warn!("Could not save high score: {}", e);
    }
    log::info!(
        "Simulated {:.0}s over {} runs, best {:.1}s",
        seconds,
        game.state.run_index + 1,
        game.scores.get_high_score()
    );
}
