//! HUD text for the host's labels

use crate::sim::GameState;

/// Format seconds as `MM:SS`
///
/// Minutes are not wrapped at an hour, so a long run reads `100:00`.
pub fn format_time(seconds: f32) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u32;
    let secs = (seconds.floor() as u32) % 60;
    format!("{:02}:{:02}", minutes, secs)
}

/// Speed label in knots (half the forward speed, truncated toward zero)
pub fn velocity_label(forward_speed: f32) -> String {
    format!("{} kn", (forward_speed / 2.0) as i32)
}

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudFrame {
    pub time: String,
    pub high_score: String,
    pub velocity: String,
    pub visible: bool,
}

impl HudFrame {
    pub fn from_state(state: &GameState, high_score: f32) -> Self {
        Self {
            time: format_time(state.elapsed()),
            high_score: format_time(high_score),
            velocity: velocity_label(crate::forward_speed(state.boat.velocity)),
            visible: state.hud_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(9.99), "00:09");
        assert_eq!(format_time(65.9), "01:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(6000.0), "100:00");
    }

    #[test]
    fn test_format_time_degenerate() {
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f32::NAN), "00:00");
    }

    #[test]
    fn test_velocity_label() {
        assert_eq!(velocity_label(0.0), "0 kn");
        assert_eq!(velocity_label(67.0), "33 kn");
        assert_eq!(velocity_label(-5.0), "-2 kn");
        assert_eq!(velocity_label(1.9), "0 kn");
    }

    #[test]
    fn test_frame_from_state() {
        let mut state = GameState::new(1);
        state.clock.elapsed = 125.0;
        state.boat.velocity.x = -20.0;
        let frame = HudFrame::from_state(&state, 300.0);
        assert_eq!(frame.time, "02:05");
        assert_eq!(frame.high_score, "05:00");
        assert_eq!(frame.velocity, "10 kn");
        assert!(frame.visible);
    }
}
