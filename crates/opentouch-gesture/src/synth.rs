//! Candidate report synthesis.
//!
//! Turns one frame's tracked motion plus session state into the candidate
//! report the delay pipeline queues. All the adaptive damping lives here:
//! alternation, width, and pressure widen the noise gate; speed steepens
//! the scale. Scroll output stays fractional — the pipeline's accumulator
//! decides when a detent is actually due.

use opentouch_filters::to_hid_value;

use crate::config::GestureConfig;
use crate::machine::{GesturePhase, SessionState};
use crate::tracker::TrackedMotion;

/// One frame's synthesized output, pre-delay-pipeline.
///
/// `scroll` is fractional: precision-mode scrolling emits constant sub-unit
/// detent fractions that only become ±1 ticks once the pipeline's
/// accumulator rolls over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateReport {
    /// Latched button bitmask.
    pub buttons: u8,
    /// Horizontal cursor motion, host convention.
    pub dx: i8,
    /// Vertical cursor motion, host convention (device Y inverted).
    pub dy: i8,
    /// Fractional vertical scroll, host convention.
    pub scroll: f32,
}

impl CandidateReport {
    /// A buttons-only report.
    pub const fn buttons_only(buttons: u8) -> Self {
        Self {
            buttons,
            dx: 0,
            dy: 0,
            scroll: 0.0,
        }
    }
}

/// Contact geometry feeding the adaptive thresholds for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ContactShape {
    /// Contact width code; only meaningful for single-finger primary
    /// frames (codes ≥ 4). Pass the baseline when unknown.
    pub width: u8,
    /// Contact pressure of the slot this frame updated.
    pub pressure: u8,
}

/// Synthesize the candidate report for one processed packet.
pub fn synthesize(
    config: &GestureConfig,
    session: &SessionState,
    motion: TrackedMotion,
    shape: ContactShape,
) -> CandidateReport {
    match session.phase() {
        GesturePhase::Idle => CandidateReport::buttons_only(session.button_state),
        GesturePhase::Tracking => synthesize_tracking(config, session, motion, shape),
        GesturePhase::Scrolling => synthesize_scrolling(config, session, motion),
    }
}

fn synthesize_tracking(
    config: &GestureConfig,
    session: &SessionState,
    motion: TrackedMotion,
    shape: ContactShape,
) -> CandidateReport {
    // With two contacts each slot refreshes every other frame, so a given
    // slot's per-frame delta doubles: the gate has to follow. The original
    // firmware got this multiplier right only by an operator-precedence
    // accident; the doubling itself is the contract.
    let alternation = if session.finger_count == 1 { 1.0 } else { 2.0 };
    let damping = alternation * width_damping(config, shape.width)
        * pressure_damping(config, shape.pressure);

    let threshold_x = config.move_threshold_x as f32 * damping;
    let threshold_y = config.move_threshold_y as f32 * damping;

    // Distance covered this frame in physical units; fast flicks get a
    // steeper scale than slow precise moves.
    let mm_x = motion.dx as f32 / config.units_per_mm_x;
    let mm_y = motion.dy as f32 / config.units_per_mm_y;
    let speed_mm = (mm_x * mm_x + mm_y * mm_y).sqrt();
    let scale = config.move_scale * (1.0 + config.speed_gain * speed_mm);

    CandidateReport {
        buttons: session.button_state,
        dx: to_hid_value(motion.dx, threshold_x, scale),
        // Device Y grows toward the user; hosts expect the opposite.
        dy: -to_hid_value(motion.dy, threshold_y, scale),
        scroll: 0.0,
    }
}

fn synthesize_scrolling(
    config: &GestureConfig,
    session: &SessionState,
    motion: TrackedMotion,
) -> CandidateReport {
    let magnitude = motion.dy.unsigned_abs() as f32;
    let scroll = if magnitude < config.scroll_threshold as f32 {
        0.0
    } else if magnitude < config.slow_scroll_speed {
        // Precision mode: direction only, a fixed fraction of a detent per
        // frame. The accumulator downstream turns this into one tick every
        // `slow_scroll_frames_per_detent` frames.
        motion.dy.signum() as f32 / config.slow_scroll_frames_per_detent as f32
    } else {
        motion.dy.signum() as f32 * (magnitude * config.scroll_scale).clamp(1.0, 127.0)
    };

    CandidateReport {
        buttons: session.button_state,
        dx: 0,
        dy: 0,
        scroll: -scroll,
    }
}

fn width_damping(config: &GestureConfig, width: u8) -> f32 {
    1.0 + config.width_threshold_gain * f32::from(width.saturating_sub(config.width_baseline))
}

fn pressure_damping(config: &GestureConfig, pressure: u8) -> f32 {
    1.0 + config.pressure_threshold_gain
        * f32::from(pressure.saturating_sub(config.pressure_baseline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{BUTTON_LEFT, BUTTON_RIGHT};

    fn config() -> GestureConfig {
        GestureConfig::for_resolution(40.0, 40.0)
    }

    fn session(finger_count: u8, button_state: u8) -> SessionState {
        SessionState {
            finger_count,
            button_state,
            ..SessionState::default()
        }
    }

    fn shape() -> ContactShape {
        ContactShape {
            width: 6,
            pressure: 60,
        }
    }

    #[test]
    fn idle_reports_buttons_only() {
        let report = synthesize(
            &config(),
            &session(0, BUTTON_LEFT),
            TrackedMotion { dx: 50, dy: 50 },
            shape(),
        );
        assert_eq!(report, CandidateReport::buttons_only(BUTTON_LEFT));
    }

    #[test]
    fn tracking_gates_small_motion() {
        let cfg = config();
        // move_threshold = 6 units at 40 units/mm.
        let report = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: 3, dy: -3 },
            shape(),
        );
        assert_eq!((report.dx, report.dy), (0, 0));
    }

    #[test]
    fn tracking_inverts_y() {
        let cfg = config();
        let report = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: 40, dy: 40 },
            shape(),
        );
        assert!(report.dx > 0);
        assert!(report.dy < 0);
        assert_eq!(report.dx, -report.dy);
    }

    #[test]
    fn alternation_doubles_the_gate() {
        let cfg = config();
        // Passes the single-finger gate but not the doubled two-finger one.
        let delta = cfg.move_threshold_x + 1;
        let single = synthesize(
            &cfg,
            &session(1, BUTTON_LEFT),
            TrackedMotion { dx: delta, dy: 0 },
            shape(),
        );
        let double = synthesize(
            &cfg,
            &session(2, BUTTON_LEFT),
            TrackedMotion { dx: delta, dy: 0 },
            shape(),
        );
        assert!(single.dx > 0);
        assert_eq!(double.dx, 0);
    }

    #[test]
    fn wide_or_heavy_contact_raises_the_gate() {
        let cfg = config();
        let delta = cfg.move_threshold_x + 1;
        let wide = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: delta, dy: 0 },
            ContactShape {
                width: 12,
                pressure: 60,
            },
        );
        assert_eq!(wide.dx, 0);

        let heavy = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: delta, dy: 0 },
            ContactShape {
                width: 6,
                pressure: 255,
            },
        );
        assert_eq!(heavy.dx, 0);
    }

    #[test]
    fn faster_motion_scales_steeper_than_linear() {
        let cfg = config();
        let slow = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: 20, dy: 0 },
            shape(),
        );
        let fast = synthesize(
            &cfg,
            &session(1, 0),
            TrackedMotion { dx: 200, dy: 0 },
            shape(),
        );
        assert!(i32::from(fast.dx) > 10 * i32::from(slow.dx));
    }

    #[test]
    fn scrolling_emits_fractional_detents_below_slow_speed() {
        let cfg = config();
        // Above the gate (8), below slow_scroll_speed (40).
        let report = synthesize(
            &cfg,
            &session(2, 0),
            TrackedMotion { dx: 0, dy: 20 },
            shape(),
        );
        assert_eq!(report.scroll, -1.0 / cfg.slow_scroll_frames_per_detent as f32);
        assert_eq!((report.dx, report.dy), (0, 0));
    }

    #[test]
    fn scrolling_is_proportional_in_fast_mode() {
        let cfg = config();
        let report = synthesize(
            &cfg,
            &session(2, 0),
            TrackedMotion { dx: 0, dy: -100 },
            shape(),
        );
        assert_eq!(report.scroll, 100.0 * cfg.scroll_scale);
    }

    #[test]
    fn two_fingers_with_button_held_tracks_instead_of_scrolling() {
        let cfg = config();
        let report = synthesize(
            &cfg,
            &session(2, BUTTON_RIGHT),
            TrackedMotion { dx: 0, dy: 60 },
            shape(),
        );
        assert_eq!(report.scroll, 0.0);
        assert!(report.dy != 0);
    }
}
