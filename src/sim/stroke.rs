//! Stroke timing analysis
//!
//! The rowing machine carries a single proximity sensor under the seat. Each
//! time the seat passes over it the reading rises above a threshold and then
//! falls again; the time spent covered gives the stroke speed. Strokes come
//! in pairs: the drive (propels the boat) and the recovery (free return).

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Which half of the rowing motion the next completed cycle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokePhase {
    /// Next completed cycle is a drive and yields an impulse
    #[default]
    Propelling,
    /// Next completed cycle is a recovery and yields nothing
    Returning,
}

impl StrokePhase {
    pub fn flipped(self) -> Self {
        match self {
            StrokePhase::Propelling => StrokePhase::Returning,
            StrokePhase::Returning => StrokePhase::Propelling,
        }
    }
}

/// Raw sensor bookkeeping, mutated every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorState {
    /// Accepted (post-debounce) covered state
    pub covered: bool,
    pub enter_time: f64,
    pub exit_time: f64,
    /// Raw reading that disagrees with `covered`, and when it was first seen
    pub pending: Option<(bool, f64)>,
}

/// Outcome of a completed cover→uncover cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEvent {
    /// Drive stroke finished: push the boat with this velocity
    Propel { velocity: f32 },
    /// Recovery stroke finished
    Returned,
    /// Cycle had zero or negative duration and was dropped
    Discarded,
}

/// Turns a per-tick covered/uncovered signal into stroke events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeAnalyzer {
    pub sensor: SensorState,
    pub phase: StrokePhase,
    /// Velocity of the last drive stroke (0 until the first one)
    pub last_velocity: f32,
    threshold: f32,
    debounce_secs: f32,
    stroke_length: f32,
}

impl StrokeAnalyzer {
    pub fn new(threshold: f32, debounce_secs: f32, stroke_length: f32) -> Self {
        Self {
            sensor: SensorState::default(),
            phase: StrokePhase::Propelling,
            last_velocity: 0.0,
            threshold,
            debounce_secs,
            stroke_length,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.sensor_threshold,
            tuning.debounce_secs,
            tuning.reference_stroke_length,
        )
    }

    /// Threshold a raw sensor reading
    #[inline]
    pub fn is_covered(&self, reading: f32) -> bool {
        reading > self.threshold
    }

    /// Feed a raw sensor reading
    pub fn update_reading(&mut self, reading: f32, now: f64) -> Option<StrokeEvent> {
        let covered = self.is_covered(reading);
        self.update(covered, now)
    }

    /// Feed a thresholded covered flag. Returns an event when a cycle completes.
    ///
    /// `now` is simulation time in seconds. It is kept in f64 so a sixtieth of
    /// a second still registers after days of uptime.
    pub fn update(&mut self, raw_covered: bool, now: f64) -> Option<StrokeEvent> {
        if raw_covered == self.sensor.covered {
            self.sensor.pending = None;
            return None;
        }

        // Raw reading disagrees with the accepted state; hold it until it
        // has persisted for the debounce window.
        let since = match self.sensor.pending {
            Some((value, since)) if value == raw_covered => since,
            _ => {
                self.sensor.pending = Some((raw_covered, now));
                now
            }
        };
        if now - since < f64::from(self.debounce_secs) {
            return None;
        }
        self.sensor.pending = None;

        if raw_covered {
            self.sensor.covered = true;
            self.sensor.enter_time = since;
            None
        } else {
            self.sensor.covered = false;
            self.sensor.exit_time = since;
            Some(self.complete_cycle())
        }
    }

    fn complete_cycle(&mut self) -> StrokeEvent {
        let cycle = (self.sensor.exit_time - self.sensor.enter_time) as f32;
        if !(cycle.is_finite() && cycle > 0.0) {
            log::debug!("Discarding stroke cycle of {}s", cycle);
            return StrokeEvent::Discarded;
        }

        let event = match self.phase {
            StrokePhase::Propelling => {
                let velocity = self.stroke_length / cycle;
                self.last_velocity = velocity;
                StrokeEvent::Propel { velocity }
            }
            StrokePhase::Returning => StrokeEvent::Returned,
        };
        self.phase = self.phase.flipped();
        event
    }
}

impl Default for StrokeAnalyzer {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}
