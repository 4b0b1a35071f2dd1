//! Per-contact position smoothing state.

use opentouch_filters::SimpleAverage;

/// Samples of position history kept per contact.
pub const SMOOTHING_WINDOW: usize = 5;

/// Smoothed position history for one contact slot.
///
/// Two instances exist, primary and secondary. The filter state is `Copy`
/// so a 2→1 hand-off can promote the secondary slot's history to primary by
/// plain assignment. A freshly reset slot averages to (0, 0), the "no
/// previous frame to diff against" sentinel — real contacts never report
/// the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct FingerSlot {
    x: SimpleAverage<SMOOTHING_WINDOW>,
    y: SimpleAverage<SMOOTHING_WINDOW>,
    pressure: u8,
}

impl FingerSlot {
    /// A slot with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample; returns the smoothed position.
    pub fn observe(&mut self, x: i32, y: i32, pressure: u8) -> (i32, i32) {
        self.pressure = pressure;
        (self.x.filter(x), self.y.filter(y))
    }

    /// Smoothed position, or (0, 0) when the slot has no history.
    pub fn average(&self) -> (i32, i32) {
        (self.x.average(), self.y.average())
    }

    /// Whether any sample has been observed since the last reset.
    pub fn has_history(&self) -> bool {
        !self.x.is_empty()
    }

    /// Last observed pressure.
    pub fn pressure(&self) -> u8 {
        self.pressure
    }

    /// Clear position history and pressure.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.pressure = 0;
    }
}
