//! Pursuit difficulty
//!
//! A danger zone chases the boat down the course. It stays put until the boat
//! rows through the start gate, then closes in at an ever-increasing speed.
//! Falling back behind the gate counts as a false start: the run clock is
//! held at zero and the chase speed drops back to its baseline.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Chasing boundary state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuitState {
    pub boundary_x: f32,
    pub speed: f32,
    pub gate_cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PursuitController {
    pub state: PursuitState,
    pub gate_x: f32,
    pub base_speed: f32,
    pub max_speed: f32,
    pub growth: f32,
    pub max_trailing: f32,
}

impl PursuitController {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            state: PursuitState {
                boundary_x: tuning.pursuit_start_x,
                speed: tuning.pursuit_base_speed,
                gate_cleared: false,
            },
            gate_x: tuning.gate_x,
            base_speed: tuning.pursuit_base_speed,
            max_speed: tuning.pursuit_max_speed,
            growth: tuning.pursuit_growth,
            max_trailing: tuning.pursuit_max_trailing,
        }
    }

    /// The boat has passed the gate (travel is toward -x)
    #[inline]
    pub fn is_past_gate(&self, boat_x: f32) -> bool {
        boat_x < self.gate_x
    }

    /// Advance one tick. Returns whether the gate is cleared.
    pub fn update(&mut self, boat_x: f32, dt: f32) -> bool {
        let past_gate = self.is_past_gate(boat_x);
        let s = &mut self.state;
        if past_gate {
            if !s.gate_cleared {
                log::debug!("Gate cleared at x={}", boat_x);
            }
            s.gate_cleared = true;
            s.boundary_x -= s.speed * dt;

            // Keep the zone within striking distance
            if s.boundary_x - boat_x > self.max_trailing {
                s.boundary_x = boat_x + self.max_trailing;
            }

            s.speed = (s.speed * self.growth).min(self.max_speed);
        } else {
            if s.gate_cleared {
                log::debug!("False start: boat back behind gate at x={}", boat_x);
            }
            s.gate_cleared = false;
            s.speed = self.base_speed;
        }
        s.gate_cleared
    }

    /// Distance from the boat back to the boundary
    pub fn trailing_distance(&self, boat_x: f32) -> f32 {
        self.state.boundary_x - boat_x
    }
}

impl Default for PursuitController {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

/// Run timer that only counts once the gate is cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunClock {
    pub elapsed: f32,
}

impl RunClock {
    pub fn update(&mut self, gate_cleared: bool, dt: f32) {
        if gate_cleared {
            self.elapsed += dt;
        } else {
            self.elapsed = 0.0;
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
