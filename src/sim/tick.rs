//! Fixed timestep simulation tick
//!
//! Advances one run by one frame: sensor → strokes → propulsion requests →
//! world streaming and pursuit against the reported boat position →
//! collision → lifecycle. The tick never touches the boat directly; it
//! leaves [`GameEvent`]s in `state.events` for the host to apply.

use glam::Vec3;

use super::lifecycle::Transition;
use super::state::{BodyReport, GameEvent, GameState, ImpulseFrame};
use super::stroke::StrokeEvent;
use crate::consts::DANGER_ZONE_TAG;
use crate::forward_speed;
use crate::highscores::HighScoreStore;

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw stroke sensor reading
    pub sensor_reading: f32,
    /// Boat position and velocity from the integrator
    pub body: BodyReport,
    /// Tags of colliders the boat entered since the last tick
    pub collisions: Vec<String>,
    /// End the run now (R key)
    pub reset: bool,
    /// Zero the high score (Z key)
    pub clear_high_score: bool,
}

impl TickInput {
    pub fn touched_danger_zone(&self) -> bool {
        self.collisions.iter().any(|tag| tag == DANGER_ZONE_TAG)
    }
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, scores: &mut dyn HighScoreStore) {
    state.events.clear();
    state.time += f64::from(dt);
    state.time_ticks += 1;

    let body_valid = input.body.is_finite();
    if body_valid {
        state.boat = input.body;
    } else if let Some(transition) = state.lifecycle.force_reset() {
        log::warn!(
            "Integrator reported invalid boat state {:?}, resetting run",
            input.body
        );
        apply_transition(state, transition);
        return;
    }

    if input.clear_high_score {
        scores.set_high_score(0.0);
        log::info!("High score cleared");
    }

    let mut transition = None;
    if state.lifecycle.is_active() {
        play(state, input, dt, scores);

        if input.touched_danger_zone() || input.reset {
            if input.reset {
                log::info!("Manual reset requested");
            }
            transition = state.lifecycle.end_run();
        }
    }

    if transition.is_none() {
        transition = state.lifecycle.update(dt);
    }
    if let Some(transition) = transition {
        apply_transition(state, transition);
    }
}

/// Active-run gameplay for one tick
fn play(state: &mut GameState, input: &TickInput, dt: f32, scores: &mut dyn HighScoreStore) {
    let now = state.time;
    let stroke = state.stroke.update_reading(input.sensor_reading, now);
    if let Some(StrokeEvent::Propel { velocity }) = stroke {
        let impulse = state.propulsion.push(velocity);
        state.push_event(GameEvent::Impulse {
            impulse,
            frame: ImpulseFrame::Local,
        });
    }

    let speed = forward_speed(state.boat.velocity);
    if let Some(impulse) = state
        .propulsion
        .overspeed_correction(speed, state.stroke.last_velocity)
    {
        state.push_event(GameEvent::Impulse {
            impulse,
            frame: ImpulseFrame::Local,
        });
    }

    let boat_x = state.boat_x();
    let gate_cleared = state.pursuit.update(boat_x, dt);
    state.clock.update(gate_cleared, dt);

    if let Some(extension) = state.world.update(boat_x) {
        state.push_event(GameEvent::WorldExtended {
            tile_id: extension.tile.id,
        });
    }

    // A cleared high score stays at zero for the rest of this tick
    if !input.clear_high_score {
        let elapsed = state.clock.elapsed;
        if elapsed > scores.get_high_score() {
            scores.set_high_score(elapsed);
            state.push_event(GameEvent::NewHighScore(elapsed));
        }
    }
}

fn apply_transition(state: &mut GameState, transition: Transition) {
    match transition {
        Transition::StartedSinking => {
            log::info!(
                "Run {} over after {:.1}s at x={:.0}",
                state.run_index,
                state.clock.elapsed,
                state.boat_x()
            );
            let sink = Vec3::new(0.0, -state.tuning.sink_impulse, 0.0);
            state.hud_visible = false;
            state.push_event(GameEvent::CancelVelocity);
            state.push_event(GameEvent::Impulse {
                impulse: sink,
                frame: ImpulseFrame::World,
            });
            state.push_event(GameEvent::HudVisible(false));
        }
        Transition::ShowEndPanel => {
            state.end_panel = true;
            state.push_event(GameEvent::EndPanel(true));
        }
        Transition::EnteredResetting => {
            log::debug!("Run {} resetting", state.run_index);
        }
        Transition::Reload => {
            state.reload();
            state.push_event(GameEvent::EndPanel(false));
            state.push_event(GameEvent::HudVisible(true));
            state.push_event(GameEvent::WorldReloaded);
        }
    }
}
