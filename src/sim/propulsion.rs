//! Stroke velocity to boat impulse
//!
//! Impulses are expressed in the boat's local frame; its forward axis is -x.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propulsion {
    pub force_scale: f32,
    pub max_forward_speed: f32,
}

impl Propulsion {
    pub fn new(force_scale: f32, max_forward_speed: f32) -> Self {
        Self {
            force_scale,
            max_forward_speed,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.force_scale, tuning.max_forward_speed)
    }

    /// Impulse for a stroke of the given velocity
    #[inline]
    pub fn push(&self, velocity: f32) -> Vec3 {
        Vec3::new(-velocity * self.force_scale, 0.0, 0.0)
    }

    /// Corrective impulse when the boat is over the speed cap
    ///
    /// Pushes back with half the last stroke. This damps rather than clamps,
    /// so a single correction can overshoot below the cap.
    pub fn overspeed_correction(&self, forward_speed: f32, last_velocity: f32) -> Option<Vec3> {
        if forward_speed <= self.max_forward_speed || last_velocity == 0.0 {
            return None;
        }
        Some(self.push(-last_velocity / 2.0))
    }
}

impl Default for Propulsion {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
