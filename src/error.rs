//! Error types for setup and persistence.
//!
//! The simulation tick itself never fails; these only surface where tuning is
//! loaded or the high score is read from / written to disk.

use thiserror::Error;

/// Errors produced while loading or validating [`crate::Tuning`].
#[derive(Debug, Error)]
pub enum TuningError {
    /// A value that must be positive and finite was not.
    #[error("{field} must be positive and finite (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// The clearance band leaves no room for obstacles.
    #[error("clearance {half_width} must be narrower than lateral extent {lateral_extent}")]
    ClearanceTooWide { half_width: f32, lateral_extent: f32 },

    #[error("tile cap must be at least 1")]
    EmptyTilePool,

    #[error("pursuit growth factor must be > 1 (got {0})")]
    GrowthNotIncreasing(f32),

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by persistent high-score stores.
#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
