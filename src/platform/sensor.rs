//! Stroke sensor sources

/// Yields one raw reading per tick
pub trait SensorSource {
    /// `now` is simulation time in seconds
    fn read(&mut self, now: f64) -> f32;
}

/// Replays a steady rowing cadence
///
/// One full stroke is: drive (covered), pause, recovery (covered), pause.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSensor {
    pub drive_secs: f32,
    pub recovery_secs: f32,
    pub pause_secs: f32,
    pub covered_value: f32,
    pub uncovered_value: f32,
    /// Stop rowing after this time (None = row forever)
    pub stop_after: Option<f32>,
}

impl ScriptedSensor {
    pub fn new(drive_secs: f32, recovery_secs: f32, pause_secs: f32) -> Self {
        Self {
            drive_secs,
            recovery_secs,
            pause_secs,
            covered_value: 512.0,
            uncovered_value: 20.0,
            stop_after: None,
        }
    }

    pub fn period(&self) -> f32 {
        self.drive_secs + self.recovery_secs + 2.0 * self.pause_secs
    }

    fn covered_at(&self, now: f64) -> bool {
        if self.stop_after.is_some_and(|t| now >= f64::from(t)) {
            return false;
        }
        let t = now.rem_euclid(f64::from(self.period())) as f32;
        let recovery_start = self.drive_secs + self.pause_secs;
        t < self.drive_secs || (t >= recovery_start && t < recovery_start + self.recovery_secs)
    }
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self::new(0.4, 0.6, 0.3)
    }
}

impl SensorSource for ScriptedSensor {
    fn read(&mut self, now: f64) -> f32 {
        if self.covered_at(now) {
            self.covered_value
        } else {
            self.uncovered_value
        }
    }
}
