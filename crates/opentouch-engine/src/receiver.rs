//! Byte-receive adapter for the transport callback context.

use std::sync::Arc;

use opentouch_synaptics_protocol::PacketFramer;

use crate::queue::RawPacketQueue;

/// Owns the framer on the byte-receive side of the SPSC split.
///
/// `on_byte` is the transport's per-byte callback: constant-time,
/// non-blocking, and touching nothing but the framer and the queue. All
/// gesture state lives on the consumer side.
#[derive(Debug)]
pub struct ByteReceiver {
    framer: PacketFramer,
    queue: Arc<RawPacketQueue>,
}

impl ByteReceiver {
    /// A receiver feeding `queue`.
    pub fn new(queue: Arc<RawPacketQueue>) -> Self {
        Self {
            framer: PacketFramer::new(),
            queue,
        }
    }

    /// Feed one transport byte.
    pub fn on_byte(&mut self, byte: u8) {
        if let Some(packet) = self.framer.push_byte(byte) {
            self.queue.push(packet);
        }
    }

    /// Bytes discarded by stream resynchronization so far.
    pub fn resync_count(&self) -> u64 {
        self.framer.resync_count()
    }
}
