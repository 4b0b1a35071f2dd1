//! Session state and gesture phase transitions.

use tracing::debug;

/// LEFT button bit in the outgoing report bitmask.
pub const BUTTON_LEFT: u8 = 0x01;
/// RIGHT button bit in the outgoing report bitmask.
pub const BUTTON_RIGHT: u8 = 0x02;

/// What the current frame is doing, derived purely from the contact count
/// and the latched button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// No contacts. A button may still be reported (non-finger press).
    Idle,
    /// Cursor movement: one contact, or several with the button held.
    Tracking,
    /// Two or more contacts, button up: vertical scroll.
    Scrolling,
}

/// Total classification: every reachable (finger_count, button_state) pair
/// maps to exactly one phase.
pub fn classify(finger_count: u8, button_state: u8) -> GesturePhase {
    if finger_count == 0 {
        GesturePhase::Idle
    } else if finger_count >= 2 && button_state == 0 {
        GesturePhase::Scrolling
    } else {
        GesturePhase::Tracking
    }
}

/// Edges observed while folding one primary packet into the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Finger count rose from zero: a new session begins.
    pub session_started: bool,
    /// 0→1 edge of the physical button.
    pub button_pressed: bool,
    /// 1→0 edge of the physical button.
    pub button_released: bool,
    /// The finger count decreased this frame.
    pub finger_count_decreased: bool,
}

/// Per-session state: contact count, latched button, and the frame ticks
/// that anchor the delay pipeline's freeze windows.
///
/// Which button a physical press reports is decided once, at the press
/// edge, from the finger count at that moment: fewer than two fingers is a
/// left click, two or more a right click. The choice then stays latched
/// until release, so losing or gaining a finger mid-drag can never flicker
/// left into right.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionState {
    /// Contacts on the pad, 0..=3.
    pub finger_count: u8,
    /// Latched button bitmask, [`BUTTON_LEFT`] / [`BUTTON_RIGHT`].
    pub button_state: u8,
    /// Monotonic count of processed packets.
    pub frame_tick: u64,
    /// Tick of the last 0→>0 finger-count transition.
    pub session_started_tick: u64,
    /// Tick of the last button release; 0 means "none yet".
    pub button_released_tick: u64,
}

impl SessionState {
    /// Fresh idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one primary packet's button bit and finger count into the
    /// session. Must be called exactly once per primary packet, after the
    /// tracker has consumed the same packet.
    pub fn apply_primary(&mut self, physical_button: bool, new_count: u8) -> FrameEvents {
        self.frame_tick += 1;
        let mut events = FrameEvents::default();

        if physical_button {
            if self.button_state == 0 {
                events.button_pressed = true;
                self.button_state = if new_count >= 2 {
                    BUTTON_RIGHT
                } else {
                    BUTTON_LEFT
                };
                debug!(button = self.button_state, new_count, "button latched");
            }
            // Held: keep whatever was latched at the press edge.
        } else if self.button_state != 0 {
            events.button_released = true;
            self.button_state = 0;
            self.button_released_tick = self.frame_tick;
        }

        if new_count > 0 && self.finger_count == 0 {
            events.session_started = true;
            self.session_started_tick = self.frame_tick;
        }
        events.finger_count_decreased = new_count < self.finger_count;
        self.finger_count = new_count;

        if self.finger_count == 0 && self.button_state == 0 {
            // Back to idle defaults; the released tick survives so the
            // post-release freeze window keeps counting.
            self.session_started_tick = 0;
        }
        events
    }

    /// Count a processed secondary packet. Secondary packets never change
    /// the finger count or the button state.
    pub fn apply_secondary(&mut self) {
        self.frame_tick += 1;
    }

    /// Phase of the current frame.
    pub fn phase(&self) -> GesturePhase {
        classify(self.finger_count, self.button_state)
    }

    /// Whether the post-release freeze window is still open.
    pub fn in_stabilization(&self, stabilization_frames: u64) -> bool {
        self.button_released_tick != 0
            && self.frame_tick - self.button_released_tick < stabilization_frames
    }
}
