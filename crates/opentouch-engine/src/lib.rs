//! Packet queues, the delayed report pipeline, and the end-to-end engine.
//!
//! This crate wires the protocol and gesture crates to a running device.
//! The boundary runs between two execution contexts:
//!
//! - byte-receive side: [`ByteReceiver`] frames transport bytes and parks
//!   complete packets in the lock-free [`RawPacketQueue`]. Constant-time,
//!   non-blocking, interrupt-safe.
//! - main-loop side: [`GestureEngine::poll`] drains the queue, runs the
//!   tracker and state machine per packet, and pushes candidates through
//!   the [`ReportPipeline`] before they reach the [`ReportSink`].
//!
//! The pipeline is the piece that makes clickpads usable: every report is
//! held `delay_frames` packets so a button press or finger lift can zero
//! the garbled motion of the immediate past before the host ever sees it.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod engine;
pub mod pipeline;
pub mod queue;
pub mod receiver;
pub mod sink;

pub use engine::{EngineError, GestureEngine};
pub use pipeline::{PendingReport, REPORT_QUEUE_CAPACITY, ReportPipeline};
pub use queue::{RAW_QUEUE_CAPACITY, RawPacketQueue};
pub use receiver::ByteReceiver;
pub use sink::ReportSink;
