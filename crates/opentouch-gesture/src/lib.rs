//! Multi-finger tracking, gesture classification, and report synthesis.
//!
//! This crate is the pure per-frame transform of the OpenTouch pipeline: it
//! owns no queues and does no I/O. Decoded packets go in, candidate reports
//! come out, and everything in between — contact slot hand-off, the
//! Idle/Tracking/Scrolling phase machine, button latching, adaptive noise
//! gating — is deterministic state held in plain structs. The engine crate
//! wires these pieces to the raw-packet queue and the delayed report
//! pipeline.
//!
//! Phase rules (total over all reachable states):
//!
//! - no contacts ⇒ [`GesturePhase::Idle`]
//! - ≥2 contacts, button up ⇒ [`GesturePhase::Scrolling`]
//! - anything else ⇒ [`GesturePhase::Tracking`]
//!
//! A physical press latches LEFT or RIGHT once, from the finger count at
//! the press edge; two-finger click is the clickpad's right button.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod machine;
pub mod slot;
pub mod synth;
pub mod tracker;

pub use config::GestureConfig;
pub use machine::{BUTTON_LEFT, BUTTON_RIGHT, FrameEvents, GesturePhase, SessionState, classify};
pub use slot::FingerSlot;
pub use synth::{CandidateReport, ContactShape, synthesize};
pub use tracker::{FingerTracker, TrackedMotion, finger_count_for};
