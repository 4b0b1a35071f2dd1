//! The end-to-end gesture engine: decoded packets in, input reports out.

use opentouch_gesture::{
    ContactShape, FingerTracker, FrameEvents, GestureConfig, SessionState, finger_count_for,
    synthesize,
};
use opentouch_synaptics_protocol::{PacketKind, RawPacket, decode};
use thiserror::Error;
use tracing::{debug, trace};

use crate::pipeline::{REPORT_QUEUE_CAPACITY, ReportPipeline};
use crate::queue::RawPacketQueue;
use crate::sink::ReportSink;

/// Engine construction failures.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured output lag can never prime within the report queue.
    #[error("delay of {delay} frames cannot prime within a queue of {capacity}")]
    DelayExceedsCapacity {
        /// Configured `delay_frames`.
        delay: usize,
        /// Fixed report queue capacity.
        capacity: usize,
    },
}

/// Ties the tracker, session state machine, and delayed report pipeline
/// together into the per-packet main-loop step.
///
/// Main-loop side only; the byte-receive side stops at [`RawPacketQueue`].
/// Each processed packet pushes exactly one candidate report and emits at
/// most one finished report, so the pipeline's output lag is a fixed number
/// of packets.
#[derive(Debug)]
pub struct GestureEngine {
    config: GestureConfig,
    tracker: FingerTracker,
    session: SessionState,
    pipeline: ReportPipeline,
    last_buttons: u8,
}

impl GestureEngine {
    /// Build an engine for `config`.
    pub fn new(config: GestureConfig) -> Result<Self, EngineError> {
        if config.delay_frames >= REPORT_QUEUE_CAPACITY {
            return Err(EngineError::DelayExceedsCapacity {
                delay: config.delay_frames,
                capacity: REPORT_QUEUE_CAPACITY,
            });
        }
        Ok(Self {
            config,
            tracker: FingerTracker::new(),
            session: SessionState::new(),
            pipeline: ReportPipeline::new(),
            last_buttons: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Reports dropped by pipeline overflow since construction.
    pub fn report_overflows(&self) -> u64 {
        self.pipeline.overflows()
    }

    /// Packets folded into the session so far.
    pub fn session_tick(&self) -> u64 {
        self.session.frame_tick
    }

    /// Drain the raw-packet queue, processing every pending packet.
    pub fn poll<S: ReportSink>(&mut self, queue: &RawPacketQueue, sink: &mut S) {
        while let Some(packet) = queue.pop() {
            self.process_packet(packet, sink);
        }
    }

    /// Process one raw packet: decode, track, classify, queue, and emit at
    /// most one finished report into `sink`.
    pub fn process_packet<S: ReportSink>(&mut self, packet: RawPacket, sink: &mut S) {
        match decode(packet) {
            PacketKind::Primary {
                x,
                y,
                z,
                width,
                button,
            } => self.process_primary(i32::from(x), i32::from(y), z, width, button, sink),
            PacketKind::SecondaryExtended { x, y, z } => {
                self.process_secondary(i32::from(x), i32::from(y), z, sink);
            }
            PacketKind::FingerCountExtended { finger_count, .. } => {
                // Counts are derived from primary packets; this report adds
                // nothing the next primary frame won't.
                trace!(finger_count, "ignoring finger-count packet");
            }
            PacketKind::PassThrough => trace!("ignoring pass-through packet"),
        }
    }

    fn process_primary<S: ReportSink>(
        &mut self,
        x: i32,
        y: i32,
        z: u8,
        width: u8,
        button: bool,
        sink: &mut S,
    ) {
        let new_count = finger_count_for(z, width);
        let motion =
            self.tracker
                .track_primary(&self.config, self.session.finger_count, new_count, x, y, z);
        let events = self.session.apply_primary(button, new_count);
        if events.session_started {
            debug!(new_count, "session started");
            self.pipeline.clear();
        }

        // Width codes below 4 count fingers instead of measuring the
        // contact; fall back to the neutral baseline there.
        let shape = ContactShape {
            width: if width >= 4 {
                width
            } else {
                self.config.width_baseline
            },
            pressure: self.tracker.primary_pressure(),
        };
        let candidate = synthesize(&self.config, &self.session, motion, shape);
        self.pipeline
            .push(&self.config, candidate, &events, &self.session);
        self.emit_ready(sink);
    }

    fn process_secondary<S: ReportSink>(&mut self, x: i32, y: i32, z: u8, sink: &mut S) {
        let motion = self.tracker.track_secondary(&self.config, x, y, z);
        self.session.apply_secondary();

        let shape = ContactShape {
            width: self.config.width_baseline,
            pressure: self.tracker.secondary_pressure(),
        };
        let candidate = synthesize(&self.config, &self.session, motion, shape);
        self.pipeline
            .push(&self.config, candidate, &FrameEvents::default(), &self.session);
        self.emit_ready(sink);
    }

    fn emit_ready<S: ReportSink>(&mut self, sink: &mut S) {
        let Some(report) = self.pipeline.pop_ready(self.config.delay_frames) else {
            return;
        };
        // Idle chatter suppression: a report that moves nothing and repeats
        // the button state carries no information.
        if report.is_motionless() && report.buttons == self.last_buttons {
            return;
        }
        self.last_buttons = report.buttons;
        sink.emit(report.buttons, report.dx, report.dy, report.scroll);
    }
}
