//! Raw packet assembly and stream resynchronization.

use tracing::{debug, trace};

/// Sync checkpoint for byte 0 of an absolute-mode frame: `1 0 W3 W2 0 W1 R L`.
pub const SYNC0_MASK: u8 = 0xC8;
/// Expected value of byte 0 under [`SYNC0_MASK`].
pub const SYNC0_VALUE: u8 = 0x80;
/// Sync checkpoint for byte 3: `1 1 Y12 X12 0 W0 R^D L^U`.
pub const SYNC3_MASK: u8 = 0xC8;
/// Expected value of byte 3 under [`SYNC3_MASK`].
pub const SYNC3_VALUE: u8 = 0xC0;

/// One complete 6-byte absolute-mode packet, packed into a 48-bit value.
///
/// Created by the [`PacketFramer`], consumed once by [`crate::decode`], then
/// discarded. The payload is opaque at this layer; all field extraction
/// lives in the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPacket(u64);

impl RawPacket {
    /// Number of transport bytes per packet.
    pub const LEN: usize = 6;

    /// Pack six transport bytes, byte 0 in the low-order position.
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        let mut value = 0u64;
        for (i, byte) in bytes.iter().enumerate() {
            value |= u64::from(*byte) << (i * 8);
        }
        Self(value)
    }

    /// Transport byte at `index` (0..6). Out-of-range indices read as zero.
    pub fn byte(self, index: usize) -> u8 {
        if index >= Self::LEN {
            return 0;
        }
        (self.0 >> (index * 8)) as u8
    }

    /// The packed 48-bit value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// The packet as transport bytes, in arrival order.
    pub fn to_bytes(self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (self.0 >> (i * 8)) as u8;
        }
        bytes
    }
}

/// Accumulates transport bytes into complete [`RawPacket`]s.
///
/// Constant-time per byte and allocation-free, so it is safe to drive from
/// the byte-receive interrupt context. Bytes 0 and 3 of every frame carry
/// fixed sync patterns; a mismatch at either checkpoint discards the partial
/// frame and resumes scanning at the offending byte. This is the sole
/// recovery mechanism for bit slips and dropped bytes on the lossy PS/2
/// link, so it is logged but never surfaced as an error.
#[derive(Debug, Default)]
pub struct PacketFramer {
    buffer: [u8; RawPacket::LEN],
    index: usize,
    resyncs: u64,
}

impl PacketFramer {
    /// A framer scanning for the start of a frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport byte; returns a packet when a frame completes.
    pub fn push_byte(&mut self, byte: u8) -> Option<RawPacket> {
        if self.index == 0 {
            if byte & SYNC0_MASK != SYNC0_VALUE {
                trace!(byte, "discarding byte while scanning for frame start");
                self.resyncs = self.resyncs.wrapping_add(1);
                return None;
            }
        } else if self.index == 3 && byte & SYNC3_MASK != SYNC3_VALUE {
            debug!(byte, "frame sync lost at byte 3, rescanning");
            self.resyncs = self.resyncs.wrapping_add(1);
            self.index = 0;
            // The offending byte may itself start the next frame.
            return self.push_byte(byte);
        }

        self.buffer[self.index] = byte;
        self.index += 1;
        if self.index < RawPacket::LEN {
            return None;
        }
        self.index = 0;
        Some(RawPacket::from_bytes(self.buffer))
    }

    /// Bytes discarded at a sync checkpoint since construction.
    pub fn resync_count(&self) -> u64 {
        self.resyncs
    }

    /// Drop any partial frame and resume scanning for a frame start.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}
