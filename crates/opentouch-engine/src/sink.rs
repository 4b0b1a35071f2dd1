//! Output seam between the engine and the host transport.

/// Consumer of finished input reports.
///
/// The engine calls `emit` at most once per processed packet, from the main
/// loop only. Implementations translate to whatever the host side speaks:
/// a HID endpoint, a uinput device, a test buffer.
pub trait ReportSink {
    /// Deliver one report: button bitmask, cursor motion, and wheel detents.
    fn emit(&mut self, buttons: u8, dx: i8, dy: i8, wheel: i8);
}

impl<F> ReportSink for F
where
    F: FnMut(u8, i8, i8, i8),
{
    fn emit(&mut self, buttons: u8, dx: i8, dy: i8, wheel: i8) {
        self(buttons, dx, dy, wheel);
    }
}
