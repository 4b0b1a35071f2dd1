//! Gesture pipeline configuration.

use serde::{Deserialize, Serialize};

/// Default X resolution when the device query is unavailable, units per mm.
pub const DEFAULT_UNITS_PER_MM_X: f32 = 47.0;
/// Default Y resolution when the device query is unavailable, units per mm.
pub const DEFAULT_UNITS_PER_MM_Y: f32 = 45.0;

/// Tuning for the tracker, state machine, and delay pipeline.
///
/// All spatial fields are in device units; [`GestureConfig::for_resolution`]
/// derives them from the units-per-mm values reported by the resolution
/// query at init time, so behavior is consistent across pad sizes. The
/// physical-unit constants baked into that derivation were tuned by hand on
/// real hardware; treat them as a starting point, not gospel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// X device units per millimetre.
    pub units_per_mm_x: f32,
    /// Y device units per millimetre.
    pub units_per_mm_y: f32,

    /// Baseline cursor-motion noise gate, X, device units.
    pub move_threshold_x: i32,
    /// Baseline cursor-motion noise gate, Y, device units.
    pub move_threshold_y: i32,
    /// Cursor counts per device unit of gated delta.
    pub move_scale: f32,
    /// Extra scale per mm/frame of instantaneous speed: fast flicks are
    /// proportionally more responsive than slow precise moves. Deliberate
    /// non-linearity.
    pub speed_gain: f32,

    /// Contact width above which the noise gate widens.
    pub width_baseline: u8,
    /// Threshold growth per width step beyond the baseline.
    pub width_threshold_gain: f32,
    /// Pressure above which the noise gate widens.
    pub pressure_baseline: u8,
    /// Threshold growth per pressure step beyond the baseline.
    pub pressure_threshold_gain: f32,

    /// Contact hand-off proximity window, X, device units.
    pub proximity_threshold_x: i32,
    /// Contact hand-off proximity window, Y, device units.
    pub proximity_threshold_y: i32,
    /// Largest believable single-finger delta per frame, X, device units.
    pub max_delta_x: i32,
    /// Largest believable single-finger delta per frame, Y, device units.
    pub max_delta_y: i32,

    /// Scroll noise gate, device units.
    pub scroll_threshold: i32,
    /// Scroll detents per device unit in fast mode.
    pub scroll_scale: f32,
    /// Speed (device units/frame) below which scrolling quantizes to fixed
    /// sub-unit detent fractions (precision mode).
    pub slow_scroll_speed: f32,
    /// Frames per emitted detent in precision scroll mode.
    pub slow_scroll_frames_per_detent: u32,

    /// Output lag of the delayed report pipeline, frames.
    pub delay_frames: usize,
    /// Post-button-release freeze window, frames.
    pub stabilization_frames: u64,
}

impl GestureConfig {
    /// Derive a configuration from the device resolution query.
    pub fn for_resolution(units_per_mm_x: f32, units_per_mm_y: f32) -> Self {
        Self {
            units_per_mm_x,
            units_per_mm_y,
            move_threshold_x: (units_per_mm_x * 0.15) as i32,
            move_threshold_y: (units_per_mm_y * 0.15) as i32,
            move_scale: 10.0 / units_per_mm_x,
            speed_gain: 0.3,
            width_baseline: 6,
            width_threshold_gain: 0.25,
            pressure_baseline: 80,
            pressure_threshold_gain: 0.02,
            proximity_threshold_x: (units_per_mm_x * 4.0) as i32,
            proximity_threshold_y: (units_per_mm_y * 4.0) as i32,
            max_delta_x: (units_per_mm_x * 2.5) as i32,
            max_delta_y: (units_per_mm_y * 2.5) as i32,
            scroll_threshold: (units_per_mm_y * 0.2) as i32,
            scroll_scale: 4.0 / units_per_mm_y,
            slow_scroll_speed: units_per_mm_y,
            slow_scroll_frames_per_detent: 4,
            delay_frames: 3,
            stabilization_frames: 8,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::for_resolution(DEFAULT_UNITS_PER_MM_X, DEFAULT_UNITS_PER_MM_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_scales_spatial_thresholds() {
        let small = GestureConfig::for_resolution(40.0, 40.0);
        let large = GestureConfig::for_resolution(80.0, 80.0);
        assert!(large.move_threshold_x > small.move_threshold_x);
        assert!(large.proximity_threshold_y > small.proximity_threshold_y);
        assert!(large.move_scale < small.move_scale);
    }

    #[test]
    fn default_matches_default_resolution() {
        let config = GestureConfig::default();
        assert_eq!(
            config,
            GestureConfig::for_resolution(DEFAULT_UNITS_PER_MM_X, DEFAULT_UNITS_PER_MM_Y)
        );
    }

    #[test]
    fn serde_round_trip_preserves_everything() {
        let config = GestureConfig::for_resolution(52.0, 38.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: GestureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GestureConfig = serde_json::from_str(r#"{"delay_frames": 5}"#).unwrap();
        assert_eq!(config.delay_frames, 5);
        assert_eq!(
            config.stabilization_frames,
            GestureConfig::default().stabilization_frames
        );
    }
}
