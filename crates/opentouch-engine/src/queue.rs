//! Bounded SPSC queue between the byte-receive context and the main loop.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::queue::ArrayQueue;
use opentouch_synaptics_protocol::RawPacket;
use tracing::warn;

/// Capacity of the raw-packet FIFO. Sized for worst-case main-loop
/// latency, not protocol need: at the device's peak packet rate, four
/// packets is several milliseconds of slack.
pub const RAW_QUEUE_CAPACITY: usize = 4;

/// Lock-free bounded FIFO of complete raw packets.
///
/// Single producer (the byte-receive callback), single consumer (the main
/// loop). The producer never blocks: when the queue is full, the *oldest*
/// pending packet is displaced, favoring freshness over completeness — a
/// stale touch position is worse than a missing one. Displacements are
/// counted for observability; overflow is degradation, not an error.
#[derive(Debug)]
pub struct RawPacketQueue {
    queue: ArrayQueue<RawPacket>,
    dropped: AtomicU64,
}

impl RawPacketQueue {
    /// An empty queue of [`RAW_QUEUE_CAPACITY`] packets.
    pub fn new() -> Self {
        Self {
            queue: ArrayQueue::new(RAW_QUEUE_CAPACITY),
            dropped: AtomicU64::new(0),
        }
    }

    /// Append a packet, displacing the oldest pending one when full.
    /// Constant-time and non-blocking; callable from interrupt context.
    pub fn push(&self, packet: RawPacket) {
        if self.queue.force_push(packet).is_some() {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(dropped, "raw packet queue full, dropped oldest frame");
        }
    }

    /// Take the oldest pending packet.
    pub fn pop(&self) -> Option<RawPacket> {
        self.queue.pop()
    }

    /// Packets currently pending.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Packets displaced by overflow since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for RawPacketQueue {
    fn default() -> Self {
        Self::new()
    }
}
