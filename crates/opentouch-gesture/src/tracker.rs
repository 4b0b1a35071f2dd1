//! Contact slot management and frame-to-frame delta computation.

use tracing::debug;

use crate::config::GestureConfig;
use crate::slot::FingerSlot;

/// Smoothed frame-to-frame motion of whichever slot the current packet
/// updated. Zero on transition frames and after guard resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackedMotion {
    /// Smoothed X delta, device units.
    pub dx: i32,
    /// Smoothed Y delta, device units (device convention, not yet inverted).
    pub dy: i32,
}

impl TrackedMotion {
    /// No motion this frame.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };
}

/// Derive the contact count from pressure and the width code of a primary
/// packet. Zero pressure always means zero contacts; otherwise the width
/// code reports 2 (code 0), 3 or more (code 1), or a single contact whose
/// width the code measures.
pub fn finger_count_for(z: u8, width: u8) -> u8 {
    if z == 0 {
        return 0;
    }
    match width {
        0 => 2,
        1 => 3,
        _ => 1,
    }
}

/// Owns the two contact slots and the hand-off heuristics between them.
///
/// The protocol can count three contacts but only ever positions two; the
/// third is invisible here. Both slots smooth independently: primary from
/// primary packets, secondary from secondary/extended packets, which
/// alternate frames while two or more fingers are down.
#[derive(Debug, Default)]
pub struct FingerTracker {
    primary: FingerSlot,
    secondary: FingerSlot,
}

impl FingerTracker {
    /// A tracker with no contact history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the primary contact sample of one packet.
    ///
    /// `prev_count` is the session's finger count before this frame,
    /// `new_count` the one derived from this packet. Count transitions
    /// reset or hand off slot history and always yield zero motion; steady
    /// frames diff the smoothed position against the previous average.
    pub fn track_primary(
        &mut self,
        config: &GestureConfig,
        prev_count: u8,
        new_count: u8,
        x: i32,
        y: i32,
        z: u8,
    ) -> TrackedMotion {
        if new_count != prev_count {
            self.apply_count_transition(config, prev_count, new_count, x, y);
        }

        let had_history = self.primary.has_history();
        let (prev_x, prev_y) = self.primary.average();
        let (avg_x, avg_y) = self.primary.observe(x, y, z);

        if new_count != prev_count || !had_history {
            return TrackedMotion::ZERO;
        }

        let motion = TrackedMotion {
            dx: avg_x - prev_x,
            dy: avg_y - prev_y,
        };
        if new_count == 1 && Self::jump_guard(config, &mut self.primary, motion, x, y, z) {
            return TrackedMotion::ZERO;
        }
        motion
    }

    /// Process a secondary/extended contact sample.
    ///
    /// An all-zero sample means "no secondary contact" and clears the slot.
    /// Never touches the primary slot or the session counts.
    pub fn track_secondary(
        &mut self,
        config: &GestureConfig,
        x: i32,
        y: i32,
        z: u8,
    ) -> TrackedMotion {
        if x == 0 && y == 0 && z == 0 {
            self.secondary.reset();
            return TrackedMotion::ZERO;
        }

        let had_history = self.secondary.has_history();
        let (prev_x, prev_y) = self.secondary.average();
        let (avg_x, avg_y) = self.secondary.observe(x, y, z);

        if !had_history {
            return TrackedMotion::ZERO;
        }

        let motion = TrackedMotion {
            dx: avg_x - prev_x,
            dy: avg_y - prev_y,
        };
        if Self::jump_guard(config, &mut self.secondary, motion, x, y, z) {
            return TrackedMotion::ZERO;
        }
        motion
    }

    /// Pressure last seen on the primary slot.
    pub fn primary_pressure(&self) -> u8 {
        self.primary.pressure()
    }

    /// Pressure last seen on the secondary slot.
    pub fn secondary_pressure(&self) -> u8 {
        self.secondary.pressure()
    }

    /// Drop all contact history.
    pub fn reset(&mut self) {
        self.primary.reset();
        self.secondary.reset();
    }

    fn apply_count_transition(
        &mut self,
        config: &GestureConfig,
        prev_count: u8,
        new_count: u8,
        x: i32,
        y: i32,
    ) {
        if new_count > prev_count {
            self.secondary.reset();
            if prev_count == 0 {
                self.primary.reset();
            }
            return;
        }

        if prev_count == 2 && new_count == 1 {
            // One of two fingers lifted; decide which one survived by
            // proximity to each slot's smoothed position.
            let near_secondary =
                self.secondary.has_history() && self.near(config, self.secondary.average(), x, y);
            let near_primary =
                self.primary.has_history() && self.near(config, self.primary.average(), x, y);
            if near_secondary {
                self.primary = self.secondary;
            } else if !near_primary {
                // Matches neither slot: prefer a visible one-frame jump
                // over merging histories of different fingers.
                debug!(x, y, "ambiguous contact hand-off, dropping primary history");
                self.primary.reset();
            }
            self.secondary.reset();
            return;
        }

        // Lost all contacts, or dropping out of a three-finger state;
        // history is too unreliable to disambiguate.
        self.reset();
    }

    fn near(&self, config: &GestureConfig, average: (i32, i32), x: i32, y: i32) -> bool {
        (x - average.0).abs() <= config.proximity_threshold_x
            && (y - average.1).abs() <= config.proximity_threshold_y
    }

    fn jump_guard(
        config: &GestureConfig,
        slot: &mut FingerSlot,
        motion: TrackedMotion,
        x: i32,
        y: i32,
        z: u8,
    ) -> bool {
        if motion.dx.abs() <= config.max_delta_x && motion.dy.abs() <= config.max_delta_y {
            return false;
        }
        // A jump this large inside one frame is an undetected hand-off,
        // not movement. Restart smoothing from the current sample.
        debug!(
            dx = motion.dx,
            dy = motion.dy,
            "implausible jump, restarting slot history"
        );
        slot.reset();
        slot.observe(x, y, z);
        true
    }
}
