//! Absolute-mode packet classification and field extraction.
//!
//! The device spreads each field across non-contiguous bit ranges of the
//! 6-byte frame; the masks and shifts below are a hardware contract and must
//! not be "cleaned up". Layout, bit 7 first:
//!
//! ```text
//! byte 0:  1   0  W3  W2   0  W1   R   L
//! byte 1: Y11 Y10  Y9  Y8 X11 X10  X9  X8
//! byte 2:  Z7  ..  Z0
//! byte 3:  1   1  Y12 X12  0  W0  R^D L^U
//! byte 4:  X7  ..  X0
//! byte 5:  Y7  ..  Y0
//! ```
//!
//! The 4-bit W field doubles as a finger-count hint (0 ⇒ two fingers, 1 ⇒
//! three or more) or, for values ≥ 4, a single-finger contact-width
//! measurement. W = 2 marks an extended packet whose sub-code lives in the
//! high nibble of byte 5; W = 3 is traffic for a pass-through guest device.

use crate::packet::RawPacket;

/// Width code reporting two finger contacts.
pub const WIDTH_TWO_FINGERS: u8 = 0;
/// Width code reporting three or more finger contacts.
pub const WIDTH_THREE_PLUS: u8 = 1;
/// Width code marking an extended (W-mode) packet.
const WIDTH_EXTENDED: u8 = 2;
/// Width code marking a pass-through packet from a chained guest device.
const WIDTH_PASS_THROUGH: u8 = 3;

/// Extended-packet sub-code for the secondary finger position.
const EXT_SECONDARY_FINGER: u8 = 1;
/// Extended-packet sub-code for the finger-count-only report.
const EXT_FINGER_COUNT: u8 = 2;

/// A classified absolute-mode packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    /// Position of the primary contact, plus pressure, width, and the
    /// physical button bit. The only packet kind that drives finger-count
    /// and button-state transitions.
    Primary {
        /// Absolute X, 13 bits.
        x: u16,
        /// Absolute Y, 13 bits. Device Y grows toward the user; the host
        /// convention is the opposite, inverted at output synthesis.
        y: u16,
        /// Contact pressure; zero means no contact.
        z: u8,
        /// Width code: 0 ⇒ 2 fingers, 1 ⇒ ≥3 fingers, ≥4 ⇒ contact width.
        width: u8,
        /// Physical (clickpad) button bit.
        button: bool,
    },
    /// Position of the secondary contact, reported at half resolution in
    /// alternating frames while two or more fingers are down. Never changes
    /// finger count or button state.
    SecondaryExtended {
        /// Absolute X, pre-scaled back to primary resolution.
        x: u16,
        /// Absolute Y, pre-scaled back to primary resolution.
        y: u16,
        /// Contact pressure. An all-zero (x, y, z) means "no secondary
        /// contact".
        z: u8,
    },
    /// Finger-count-only extended packet. Decoded for completeness; the
    /// pipeline derives counts from primary packets and ignores this.
    FingerCountExtended {
        /// Reported contact count.
        finger_count: u8,
        /// Physical button bit.
        button: bool,
    },
    /// Traffic for a chained pass-through device, or a reserved extended
    /// encoding. Ignored entirely.
    PassThrough,
}

/// Classify a raw packet and extract its fields. Pure and total: nothing
/// fails to decode, unknown encodings degrade to [`PacketKind::PassThrough`].
pub fn decode(packet: RawPacket) -> PacketKind {
    let b0 = packet.byte(0);
    let b1 = packet.byte(1);
    let b2 = packet.byte(2);
    let b3 = packet.byte(3);
    let b4 = packet.byte(4);
    let b5 = packet.byte(5);

    let width = ((b0 & 0x30) >> 2) | ((b0 & 0x04) >> 1) | ((b3 & 0x04) >> 2);

    match width {
        WIDTH_PASS_THROUGH => PacketKind::PassThrough,
        WIDTH_EXTENDED => match (b5 >> 4) & 0x0F {
            EXT_SECONDARY_FINGER => PacketKind::SecondaryExtended {
                x: ((u16::from(b4 & 0x0F) << 8) | u16::from(b1)) << 1,
                y: ((u16::from(b4 & 0xF0) << 4) | u16::from(b2)) << 1,
                z: ((b3 & 0x30) | (b5 & 0x0F)) << 1,
            },
            EXT_FINGER_COUNT => PacketKind::FingerCountExtended {
                finger_count: b1 & 0x0F,
                button: b0 & 0x01 != 0,
            },
            _ => PacketKind::PassThrough,
        },
        _ => PacketKind::Primary {
            x: (u16::from(b3 & 0x10) << 8) | (u16::from(b1 & 0x0F) << 8) | u16::from(b4),
            y: (u16::from(b3 & 0x20) << 7) | (u16::from(b1 & 0xF0) << 4) | u16::from(b5),
            z: b2,
            width,
            button: b0 & 0x01 != 0,
        },
    }
}
