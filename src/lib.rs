//! Rowing Runner - an endless-runner rowing simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (strokes, propulsion, world streaming, pursuit, run lifecycle)
//! - `platform`: Sensor and rigid-body collaborator interfaces
//! - `tuning`: Data-driven game balance
//! - `hud`: Display formatting for the host's text widgets
//! - `highscores`: Best survival time persistence
//! - `error`: Setup and persistence errors

pub mod error;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{HighScoreError, TuningError};
pub use highscores::{HighScoreStore, JsonFileHighScores, MemoryHighScores};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one logical frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Collider tag the integrator reports when the boat touches the pursuit boundary
    pub const DANGER_ZONE_TAG: &str = "Danger Zone";

    /// Raw sensor value above which the sensor counts as covered
    pub const SENSOR_THRESHOLD: f32 = 200.0;
    /// Distance the rower's seat travels in one stroke (world units)
    pub const REFERENCE_STROKE_LENGTH: f32 = 1.0;

    /// Stroke velocity to impulse multiplier
    pub const FORCE_SCALE: f32 = 50.0;
    /// Forward speed above which the overspeed guard kicks in
    pub const MAX_FORWARD_SPEED: f32 = 67.0;

    /// Tile dimensions along the travel axis
    pub const TILE_WIDTH: f32 = 750.0;
    pub const TILE_CAP: usize = 3;
    /// Obstacles spawn within ±this of a new tile's origin
    pub const TILE_OBSTACLE_HALF_SPAN: f32 = 340.0;
    pub const EXTENSION_MARGIN: f32 = 200.0;
    pub const TRAILING_MARGIN: f32 = 30.0;
    pub const OBSTACLES_PER_TILE: usize = 30;
    /// Lateral half-extent of the obstacle field
    pub const LATERAL_EXTENT: f32 = 150.0;
    /// Lateral clearance band kept free around the travel centerline
    pub const CLEARANCE_HALF_WIDTH: f32 = 25.0;
    /// Resting height of spawned rocks
    pub const OBSTACLE_Y: f32 = -0.5;

    /// Pursuit gate and boundary
    pub const GATE_X: f32 = -10.0;
    /// Where the danger zone waits before the gate is cleared
    pub const PURSUIT_START_X: f32 = 400.0;
    pub const PURSUIT_BASE_SPEED: f32 = 1.5;
    pub const PURSUIT_MAX_SPEED: f32 = 51.0;
    /// Per-tick multiplicative growth of the pursuit speed
    pub const PURSUIT_GROWTH: f32 = 1.0055;
    pub const PURSUIT_MAX_TRAILING: f32 = 470.0;

    /// Run lifecycle delays (seconds)
    pub const SINK_DELAY: f32 = 4.0;
    pub const END_PANEL_DELAY: f32 = 1.0;
    /// Downward world impulse applied when the boat starts sinking
    pub const SINK_IMPULSE: f32 = 200.0;
}

/// Forward speed along the travel axis (the boat travels toward -x)
#[inline]
pub fn forward_speed(velocity: Vec3) -> f32 {
    -velocity.x
}
