//! Run state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; it serializes so a run can
//! be snapshotted and replayed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::lifecycle::{RunLifecycle, RunState};
use super::propulsion::Propulsion;
use super::pursuit::{PursuitController, RunClock};
use super::stroke::StrokeAnalyzer;
use super::world::WorldStreamer;
use crate::tuning::Tuning;

/// Frame an impulse is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpulseFrame {
    /// Boat-relative (forward is -x)
    Local,
    World,
}

/// What the integrator reported for the boat this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyReport {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl BodyReport {
    pub fn at(x: f32) -> Self {
        Self {
            position: Vec3::new(x, 0.0, 0.0),
            velocity: Vec3::ZERO,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Requests and notifications for the host, produced by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Apply an impulse to the boat
    Impulse { impulse: Vec3, frame: ImpulseFrame },
    /// Stop the boat dead
    CancelVelocity,
    /// Show or hide the time, high score and speed labels
    HudVisible(bool),
    /// Start or stop the end panel animation
    EndPanel(bool),
    /// A tile has been added ahead of the boat
    WorldExtended { tile_id: u32 },
    /// High score raised to this many seconds
    NewHighScore(f32),
    /// Everything was rebuilt; the boat must go back to the start
    WorldReloaded,
}

/// Seed for the run after a run seeded with `seed`
pub fn next_run_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed of the current run
    pub seed: u64,
    /// Runs started since the process began (0-based)
    pub run_index: u32,
    /// Simulation time in seconds (monotonic across runs)
    pub time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub stroke: StrokeAnalyzer,
    pub propulsion: Propulsion,
    pub world: WorldStreamer,
    pub pursuit: PursuitController,
    pub clock: RunClock,
    pub lifecycle: RunLifecycle,
    /// Last body report
    pub boat: BodyReport,
    pub hud_visible: bool,
    pub end_panel: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self {
            stroke: StrokeAnalyzer::from_tuning(&tuning),
            propulsion: Propulsion::from_tuning(&tuning),
            world: WorldStreamer::from_tuning(&tuning, seed),
            pursuit: PursuitController::from_tuning(&tuning),
            clock: RunClock::default(),
            lifecycle: RunLifecycle::from_tuning(&tuning),
            tuning,
            seed,
            run_index: 0,
            time: 0.0,
            time_ticks: 0,
            boat: BodyReport::default(),
            hud_visible: true,
            end_panel: false,
            events: Vec::new(),
        }
    }

    /// Rebuild every run component from the next seed
    ///
    /// Simulation time keeps running; everything tied to the run starts over.
    pub fn reload(&mut self) {
        self.seed = next_run_seed(self.seed);
        self.run_index += 1;

        self.stroke = StrokeAnalyzer::from_tuning(&self.tuning);
        self.propulsion = Propulsion::from_tuning(&self.tuning);
        self.world.reset(self.seed);
        self.pursuit = PursuitController::from_tuning(&self.tuning);
        self.clock.reset();
        self.lifecycle = RunLifecycle::from_tuning(&self.tuning);
        self.boat = BodyReport::default();
        self.hud_visible = true;
        self.end_panel = false;

        log::info!("Run {} started with seed: {}", self.run_index, self.seed);
    }

    pub fn run_state(&self) -> RunState {
        self.lifecycle.state
    }

    /// Seconds survived since the gate was cleared
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed
    }

    pub fn boat_x(&self) -> f32 {
        self.boat.position.x
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
