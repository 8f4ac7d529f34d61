//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a run can be
//! re-tuned from a JSON file without recompiling. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Simulation tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Stroke sensor ===
    /// Raw reading above which the sensor is covered
    pub sensor_threshold: f32,
    /// Minimum time a raw change must persist before it is accepted (0 = off)
    pub debounce_secs: f32,
    /// Seat travel per stroke used to turn cycle time into velocity
    pub reference_stroke_length: f32,

    // === Propulsion ===
    pub force_scale: f32,
    pub max_forward_speed: f32,

    // === World streaming ===
    pub tile_width: f32,
    pub tile_cap: usize,
    pub tile_obstacle_half_span: f32,
    pub extension_margin: f32,
    pub trailing_margin: f32,
    pub obstacles_per_tile: usize,
    pub lateral_extent: f32,
    pub clearance_half_width: f32,
    /// Origin of the tile present when a run starts
    pub initial_tile_x: f32,
    /// Span filled with obstacles when a run starts (start, end)
    pub initial_obstacle_span: (f32, f32),

    // === Pursuit ===
    pub gate_x: f32,
    pub pursuit_start_x: f32,
    pub pursuit_base_speed: f32,
    pub pursuit_max_speed: f32,
    pub pursuit_growth: f32,
    pub pursuit_max_trailing: f32,

    // === Lifecycle ===
    pub sink_delay: f32,
    pub end_panel_delay: f32,
    pub sink_impulse: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sensor_threshold: SENSOR_THRESHOLD,
            debounce_secs: 0.0,
            reference_stroke_length: REFERENCE_STROKE_LENGTH,

            force_scale: FORCE_SCALE,
            max_forward_speed: MAX_FORWARD_SPEED,

            tile_width: TILE_WIDTH,
            tile_cap: TILE_CAP,
            tile_obstacle_half_span: TILE_OBSTACLE_HALF_SPAN,
            extension_margin: EXTENSION_MARGIN,
            trailing_margin: TRAILING_MARGIN,
            obstacles_per_tile: OBSTACLES_PER_TILE,
            lateral_extent: LATERAL_EXTENT,
            clearance_half_width: CLEARANCE_HALF_WIDTH,
            initial_tile_x: 0.0,
            initial_obstacle_span: (0.0, -680.0),

            gate_x: GATE_X,
            pursuit_start_x: PURSUIT_START_X,
            pursuit_base_speed: PURSUIT_BASE_SPEED,
            pursuit_max_speed: PURSUIT_MAX_SPEED,
            pursuit_growth: PURSUIT_GROWTH,
            pursuit_max_trailing: PURSUIT_MAX_TRAILING,

            sink_delay: SINK_DELAY,
            end_panel_delay: END_PANEL_DELAY,
            sink_impulse: SINK_IMPULSE,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Check the values the simulation relies on
    ///
    /// Obstacle placement rejection-samples the lateral position until it
    /// leaves the clearance band, so the band must be strictly narrower than
    /// the field or the sampler would never terminate.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("reference_stroke_length", self.reference_stroke_length),
            ("force_scale", self.force_scale),
            ("max_forward_speed", self.max_forward_speed),
            ("tile_width", self.tile_width),
            ("lateral_extent", self.lateral_extent),
            ("pursuit_base_speed", self.pursuit_base_speed),
            ("pursuit_max_speed", self.pursuit_max_speed),
            ("pursuit_max_trailing", self.pursuit_max_trailing),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if !(self.debounce_secs.is_finite() && self.debounce_secs >= 0.0) {
            return Err(TuningError::NonPositive {
                field: "debounce_secs",
                value: self.debounce_secs,
            });
        }
        if self.clearance_half_width < 0.0 || self.clearance_half_width >= self.lateral_extent {
            return Err(TuningError::ClearanceTooWide {
                half_width: self.clearance_half_width,
                lateral_extent: self.lateral_extent,
            });
        }
        if self.tile_cap == 0 {
            return Err(TuningError::EmptyTilePool);
        }
        if self.pursuit_growth <= 1.0 {
            return Err(TuningError::GrowthNotIncreasing(self.pursuit_growth));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "debounce_secs": 0.02, "tile_cap": 4 }"#).unwrap();
        assert_eq!(tuning.debounce_secs, 0.02);
        assert_eq!(tuning.tile_cap, 4);
        assert_eq!(tuning.tile_width, TILE_WIDTH);
        assert_eq!(tuning.gate_x, GATE_X);
    }

    #[test]
    fn test_rejects_clearance_wider_than_field() {
        let err = Tuning::from_json(r#"{ "clearance_half_width": 150.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ClearanceTooWide { .. }));
    }

    #[test]
    fn test_rejects_non_growing_pursuit() {
        let err = Tuning::from_json(r#"{ "pursuit_growth": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GrowthNotIncreasing(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/nonexistent/rowing-runner-tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
