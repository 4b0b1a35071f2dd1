//! Delayed report pipeline with retroactive correction.

use std::collections::VecDeque;

use opentouch_filters::ScrollAccumulator;
use opentouch_gesture::{CandidateReport, FrameEvents, GestureConfig, SessionState};
use tracing::{debug, warn};

/// Capacity of the pending-report queue.
pub const REPORT_QUEUE_CAPACITY: usize = 32;

/// One report held back for possible revision, stored by value so later
/// corrections to the queue never alias the live state that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingReport {
    /// Button bitmask.
    pub buttons: u8,
    /// Horizontal motion.
    pub dx: i8,
    /// Vertical motion.
    pub dy: i8,
    /// Vertical scroll detents.
    pub scroll: i8,
}

impl PendingReport {
    /// Whether all motion fields are zero.
    pub fn is_motionless(&self) -> bool {
        self.dx == 0 && self.dy == 0 && self.scroll == 0
    }

    fn zero_motion(&mut self) {
        self.dx = 0;
        self.dy = 0;
        self.scroll = 0;
    }
}

/// Holds every candidate report for `delay_frames` frames before release,
/// buying time to revise the recent past.
///
/// A button press or a finger lift reliably garbles the frames immediately
/// *before* it — the hand deforms before the event registers — so those
/// edges zero the motion of everything still queued. A release additionally
/// freezes the next `stabilization_frames` frames going forward. The delay
/// is queue depth, not wall-clock: each processed packet pushes one
/// candidate and releases at most one report.
#[derive(Debug)]
pub struct ReportPipeline {
    queue: VecDeque<PendingReport>,
    scroll_accumulator: ScrollAccumulator,
    overflows: u64,
}

impl ReportPipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(REPORT_QUEUE_CAPACITY),
            scroll_accumulator: ScrollAccumulator::new(),
            overflows: 0,
        }
    }

    /// Queue one frame's candidate, applying retroactive corrections and
    /// the forward freeze window.
    pub fn push(
        &mut self,
        config: &GestureConfig,
        candidate: CandidateReport,
        events: &FrameEvents,
        session: &SessionState,
    ) {
        if events.button_pressed {
            debug!("button press edge, zeroing queued motion");
            self.zero_queued_motion();
        }
        if events.finger_count_decreased {
            debug!("finger lift, zeroing queued motion");
            self.zero_queued_motion();
        }

        let mut report = PendingReport {
            buttons: candidate.buttons,
            dx: candidate.dx,
            dy: candidate.dy,
            scroll: 0,
        };
        if session.in_stabilization(config.stabilization_frames) {
            report.zero_motion();
        } else {
            report.scroll = self.scroll_accumulator.push(candidate.scroll);
        }

        if self.queue.len() >= REPORT_QUEUE_CAPACITY {
            self.overflows += 1;
            warn!(overflows = self.overflows, "report queue full, dropping newest report");
            return;
        }
        self.queue.push_back(report);
    }

    /// Release the oldest report once the pipeline is primed past
    /// `delay_frames`.
    pub fn pop_ready(&mut self, delay_frames: usize) -> Option<PendingReport> {
        if self.queue.len() > delay_frames {
            self.queue.pop_front()
        } else {
            None
        }
    }

    /// Drop all queued reports and the scroll carry; used when a new
    /// session starts so the output lag re-primes from zero.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.scroll_accumulator.reset();
    }

    /// Reports currently queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Reports dropped because the queue was full.
    pub fn overflows(&self) -> u64 {
        self.overflows
    }

    fn zero_queued_motion(&mut self) {
        for report in &mut self.queue {
            report.zero_motion();
        }
    }
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::new()
    }
}
