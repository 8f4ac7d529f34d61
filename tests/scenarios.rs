use glam::Vec3;
use rowing_runner::consts::*;
use rowing_runner::platform::{KinematicBody, RigidBody, ScriptedSensor, SensorSource};
use rowing_runner::sim::{
    BodyReport, GameEvent, GameState, RunState, StrokeAnalyzer, StrokeEvent, StrokePhase,
    TickInput, next_run_seed, tick,
};
use rowing_runner::{HighScoreStore, MemoryHighScores};

fn at(x: f32) -> TickInput {
    TickInput {
        body: BodyReport::at(x),
        ..Default::default()
    }
}

#[test]
fn stroke_scenario() {
    let mut analyzer = StrokeAnalyzer::new(SENSOR_THRESHOLD, 0.0, 1.0);
    assert_eq!(analyzer.update(true, 0.0), None);
    assert_eq!(analyzer.update(false, 0.5), Some(StrokeEvent::Propel { velocity: 2.0 }));
    assert_eq!(analyzer.phase, StrokePhase::Returning);
}

#[test]
fn false_start_then_gate() {
    let mut state = GameState::new(100);
    let mut scores = MemoryHighScores::default();

    for _ in 0..60 {
        tick(&mut state, &at(0.0), SIM_DT, &mut scores);
    }
    assert!(!state.pursuit.state.gate_cleared);
    assert_eq!(state.elapsed(), 0.0);
    assert_eq!(state.pursuit.state.speed, PURSUIT_BASE_SPEED);

    tick(&mut state, &at(-20.0), SIM_DT, &mut scores);
    assert!(state.pursuit.state.gate_cleared);
    assert!(state.elapsed() > 0.0);
    assert!((state.pursuit.state.speed - PURSUIT_BASE_SPEED * PURSUIT_GROWTH).abs() < 1e-6);

    let mut last = state.pursuit.state.speed;
    for _ in 0..1000 {
        tick(&mut state, &at(-20.0), SIM_DT, &mut scores);
        assert!(state.pursuit.state.speed >= last);
        last = state.pursuit.state.speed;
    }
    assert_eq!(state.pursuit.state.speed, PURSUIT_MAX_SPEED);

    // Back behind the gate: clock and speed drop back immediately
    tick(&mut state, &at(0.0), SIM_DT, &mut scores);
    assert!(!state.pursuit.state.gate_cleared);
    assert_eq!(state.elapsed(), 0.0);
    assert_eq!(state.pursuit.state.speed, PURSUIT_BASE_SPEED);
}

#[test]
fn collision_to_reset_sequence() {
    let seed = 2024;
    let mut state = GameState::new(seed);
    let mut scores = MemoryHighScores::default();

    // Play a little so there is something to reset
    for i in 0..120 {
        tick(&mut state, &at(-(i as f32) * 10.0), SIM_DT, &mut scores);
    }
    assert!(state.world.tile_count() > 1);
    assert!(state.pursuit.state.speed > PURSUIT_BASE_SPEED);

    let hit = TickInput {
        collisions: vec![DANGER_ZONE_TAG.to_string()],
        ..at(-1200.0)
    };
    tick(&mut state, &hit, SIM_DT, &mut scores);
    assert!(matches!(state.run_state(), RunState::Sinking { .. }));

    let sinking_ticks = (SINK_DELAY / SIM_DT).round() as usize;
    for _ in 0..sinking_ticks - 1 {
        tick(&mut state, &at(-1200.0), SIM_DT, &mut scores);
        assert!(matches!(state.run_state(), RunState::Sinking { .. }));
    }
    tick(&mut state, &at(-1200.0), SIM_DT, &mut scores);
    assert!(matches!(state.run_state(), RunState::ShowingEndPanel { .. }));
    assert!(state.events.contains(&GameEvent::EndPanel(true)));

    let panel_ticks = (END_PANEL_DELAY / SIM_DT).round() as usize;
    for _ in 0..panel_ticks - 1 {
        tick(&mut state, &at(-1200.0), SIM_DT, &mut scores);
    }
    assert!(matches!(state.run_state(), RunState::ShowingEndPanel { .. }));
    tick(&mut state, &at(-1200.0), SIM_DT, &mut scores);
    assert_eq!(state.run_state(), RunState::Resetting);

    tick(&mut state, &at(-1200.0), SIM_DT, &mut scores);
    assert_eq!(state.run_state(), RunState::Active);
    assert!(state.events.contains(&GameEvent::WorldReloaded));
    assert!(state.events.contains(&GameEvent::HudVisible(true)));
    assert!(state.hud_visible);

    let fresh = GameState::new(next_run_seed(seed));
    assert_eq!(state.world.tile_count(), 1);
    assert_eq!(state.world.frontier_x(), 0.0);
    assert_eq!(state.world.obstacles(), fresh.world.obstacles());
    assert_eq!(state.pursuit, fresh.pursuit);
    assert_eq!(state.elapsed(), 0.0);
    assert_eq!(state.run_index, 1);
}

#[test]
fn manual_reset_follows_same_sequence() {
    let mut state = GameState::new(5);
    let mut scores = MemoryHighScores::default();
    let reset = TickInput {
        reset: true,
        ..Default::default()
    };
    tick(&mut state, &reset, SIM_DT, &mut scores);
    assert!(matches!(state.run_state(), RunState::Sinking { .. }));

    // Pressing again mid-sequence changes nothing
    tick(&mut state, &reset, SIM_DT, &mut scores);
    assert!(matches!(state.run_state(), RunState::Sinking { elapsed } if elapsed > 0.0));

    let mut reloaded = false;
    for _ in 0..400 {
        tick(&mut state, &TickInput::default(), SIM_DT, &mut scores);
        if state.events.contains(&GameEvent::WorldReloaded) {
            reloaded = true;
            break;
        }
    }
    assert!(reloaded);
}

#[test]
fn overspeed_guard_converges() {
    let mut state = GameState::new(9);
    let mut scores = MemoryHighScores::default();
    let mut body = KinematicBody::new(Vec3::ZERO, 30.0, 0.0);
    body.velocity = Vec3::new(-90.0, 0.0, 0.0);
    state.stroke.last_velocity = 4.0;

    let mut last_speed = -body.velocity.x;
    for _ in 0..30 {
        let input = TickInput {
            body: body.report(),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT, &mut scores);
        body.apply_events(&state.events);
        body.integrate(SIM_DT);

        let speed = -body.velocity.x;
        if last_speed > MAX_FORWARD_SPEED {
            assert!(speed < last_speed);
        }
        last_speed = speed;
    }
    let speed = -body.velocity.x;
    assert!(speed <= MAX_FORWARD_SPEED);
    // Damping, not clamping: it can undershoot by at most one correction
    assert!(speed > MAX_FORWARD_SPEED - 2.0 * 50.0 / 30.0 - 1e-3);
}

#[test]
fn scripted_rower_moves_boat_and_streams_world() {
    let mut state = GameState::new(77);
    let mut scores = MemoryHighScores::default();
    let mut body = KinematicBody::default();
    let mut sensor = ScriptedSensor::new(0.15, 0.5, 0.2);

    let mut strokes = 0;
    for _ in 0..(20.0 / SIM_DT) as usize {
        let input = TickInput {
            sensor_reading: sensor.read(state.time),
            body: body.report(),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT, &mut scores);
        strokes += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Impulse { .. }))
            .count();
        body.apply_events(&state.events);
        body.integrate(SIM_DT);
    }

    assert!(strokes > 10);
    assert!(body.position.x < -100.0);
    assert!(state.pursuit.state.gate_cleared);
    assert!(state.elapsed() > 0.0);
    assert!(scores.get_high_score() > 0.0);
    assert!(state.world.tile_count() <= TILE_CAP);
    for o in state.world.obstacles() {
        assert!(o.pos.z.abs() > CLEARANCE_HALF_WIDTH);
    }
}
