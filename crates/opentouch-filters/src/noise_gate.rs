//! Delta-to-HID-value noise gate.

/// Maximum magnitude of a relative HID axis value.
pub const HID_VALUE_MAX: f32 = 127.0;

/// Gate, scale, and saturate a frame delta into a HID axis value.
///
/// Deltas below `threshold` are human tremor and vanish entirely. Anything
/// at or above it maps to `sign(delta) * clamp(|delta| * scale, 1, 127)`:
/// the lower clamp guarantees that a gated-in movement always produces at
/// least one count (a sub-1 product would otherwise truncate to nothing),
/// the upper clamp is the HID report range.
///
/// The caller owns all adaptivity: contact-width, pressure, and alternation
/// scaling go into `threshold`, speed scaling into `scale`.
pub fn to_hid_value(delta: i32, threshold: f32, scale: f32) -> i8 {
    if delta == 0 {
        return 0;
    }
    let magnitude = delta.unsigned_abs() as f32;
    if magnitude < threshold {
        return 0;
    }
    let scaled = (magnitude * scale).clamp(1.0, HID_VALUE_MAX) as i8;
    if delta < 0 { -scaled } else { scaled }
}
