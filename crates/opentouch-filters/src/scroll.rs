//! Fractional scroll accumulation.

/// Rolls sub-unit scroll intents over frames into discrete detents.
///
/// Slow two-finger movement produces per-frame scroll values well inside
/// (−1, 1); truncating those to an integer every frame would starve scroll
/// output entirely. The accumulator carries the fraction across frames and
/// releases a single ±1 detent each time the carry crosses a whole unit,
/// subtracting the emitted unit back out. Values at or beyond ±1 pass
/// through directly and leave the carry untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollAccumulator {
    carry: f32,
}

impl ScrollAccumulator {
    /// An accumulator with no carried fraction.
    pub const fn new() -> Self {
        Self { carry: 0.0 }
    }

    /// Feed one frame's scroll value, returning the detents to emit now.
    pub fn push(&mut self, value: f32) -> i8 {
        if value.abs() >= 1.0 {
            return value.clamp(-127.0, 127.0) as i8;
        }
        self.carry += value;
        if self.carry >= 1.0 {
            self.carry -= 1.0;
            1
        } else if self.carry <= -1.0 {
            self.carry += 1.0;
            -1
        } else {
            0
        }
    }

    /// Discard the carried fraction.
    pub fn reset(&mut self) {
        self.carry = 0.0;
    }
}
