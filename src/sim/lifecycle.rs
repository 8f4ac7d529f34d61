//! Run lifecycle
//!
//! Active → Sinking → ShowingEndPanel → Resetting → (new run) Active.
//! The two waits are elapsed-time timers advanced once per tick, so the host
//! keeps rendering and polling input while a run winds down.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Slack for timers built from summed f32 timesteps
const TIMER_EPSILON: f32 = 1e-4;

/// Where the current run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunState {
    /// Normal play
    Active,
    /// Boat hit the danger zone and is going under
    Sinking { elapsed: f32 },
    /// End panel animation is playing
    ShowingEndPanel { elapsed: f32 },
    /// Waiting for the world to be reloaded
    Resetting,
}

/// A state change the host needs to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StartedSinking,
    ShowEndPanel,
    EnteredResetting,
    /// The run must be rebuilt from scratch this tick
    Reload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLifecycle {
    pub state: RunState,
    pub sink_delay: f32,
    pub end_panel_delay: f32,
}

impl RunLifecycle {
    pub fn new(sink_delay: f32, end_panel_delay: f32) -> Self {
        Self {
            state: RunState::Active,
            sink_delay,
            end_panel_delay,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.sink_delay, tuning.end_panel_delay)
    }

    pub fn is_active(&self) -> bool {
        self.state == RunState::Active
    }

    /// End the run (collision or manual reset). Only acts while active.
    pub fn end_run(&mut self) -> Option<Transition> {
        if self.state != RunState::Active {
            return None;
        }
        self.state = RunState::Sinking { elapsed: 0.0 };
        Some(Transition::StartedSinking)
    }

    /// Jump straight to resetting from any state (invalid integrator state)
    pub fn force_reset(&mut self) -> Option<Transition> {
        if self.state == RunState::Resetting {
            return None;
        }
        self.state = RunState::Resetting;
        Some(Transition::EnteredResetting)
    }

    /// Advance timers by one tick
    pub fn update(&mut self, dt: f32) -> Option<Transition> {
        match self.state {
            RunState::Active => None,
            RunState::Sinking { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + TIMER_EPSILON >= self.sink_delay {
                    self.state = RunState::ShowingEndPanel { elapsed: 0.0 };
                    Some(Transition::ShowEndPanel)
                } else {
                    self.state = RunState::Sinking { elapsed };
                    None
                }
            }
            RunState::ShowingEndPanel { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed + TIMER_EPSILON >= self.end_panel_delay {
                    self.state = RunState::Resetting;
                    Some(Transition::EnteredResetting)
                } else {
                    self.state = RunState::ShowingEndPanel { elapsed };
                    None
                }
            }
            RunState::Resetting => Some(Transition::Reload),
        }
    }
}

impl Default for RunLifecycle {
    fn default() -> Self {
        Self::from_tuning(&Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn run_ticks(l: &mut RunLifecycle, n: usize) -> Vec<Transition> {
        (0..n).filter_map(|_| l.update(SIM_DT)).collect()
    }

    #[test]
    fn test_active_is_idle() {
        let mut l = RunLifecycle::default();
        assert!(run_ticks(&mut l, 1000).is_empty());
        assert!(l.is_active());
    }

    #[test]
    fn test_full_sequence() {
        let mut l = RunLifecycle::default();
        assert_eq!(l.end_run(), Some(Transition::StartedSinking));

        assert!(run_ticks(&mut l, 239).is_empty());
        assert!(matches!(l.state, RunState::Sinking { .. }));
        assert_eq!(run_ticks(&mut l, 1), vec![Transition::ShowEndPanel]);

        assert!(run_ticks(&mut l, 59).is_empty());
        assert!(matches!(l.state, RunState::ShowingEndPanel { .. }));
        assert_eq!(run_ticks(&mut l, 1), vec![Transition::EnteredResetting]);
        assert_eq!(l.state, RunState::Resetting);

        assert_eq!(l.update(SIM_DT), Some(Transition::Reload));
    }

    #[test]
    fn test_end_run_ignored_when_not_active() {
        let mut l = RunLifecycle::default();
        l.end_run();
        l.update(1.0);
        let before = l.state;
        assert_eq!(l.end_run(), None);
        assert_eq!(l.state, before);
    }

    #[test]
    fn test_force_reset_from_any_state() {
        for setup in 0..3 {
            let mut l = RunLifecycle::default();
            if setup >= 1 {
                l.end_run();
            }
            if setup >= 2 {
                l.update(4.0);
            }
            assert_eq!(l.force_reset(), Some(Transition::EnteredResetting));
            assert_eq!(l.state, RunState::Resetting);
            assert_eq!(l.force_reset(), None);
        }
    }

    #[test]
    fn test_large_step_advances_one_phase() {
        let mut l = RunLifecycle::default();
        l.end_run();
        assert_eq!(l.update(10.0), Some(Transition::ShowEndPanel));
        assert_eq!(l.update(10.0), Some(Transition::EnteredResetting));
    }
}
