//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics or platform dependencies

pub mod lifecycle;
pub mod propulsion;
pub mod pursuit;
pub mod state;
pub mod stroke;
pub mod tick;
pub mod world;

pub use lifecycle::{RunLifecycle, RunState, Transition};
pub use propulsion::Propulsion;
pub use pursuit::{PursuitController, PursuitState, RunClock};
pub use state::{BodyReport, GameEvent, GameState, ImpulseFrame, next_run_seed};
pub use stroke::{SensorState, StrokeAnalyzer, StrokeEvent, StrokePhase};
pub use tick::{TickInput, tick};
pub use world::{Extension, Obstacle, ObstacleVariant, Tile, WorldConfig, WorldStreamer};
