//! RT-safe filter primitives for the OpenTouch gesture pipeline.
//!
//! Three small pieces, each allocation-free, O(1) per sample, and safe to
//! run inside the per-packet processing budget:
//!
//! - [`SimpleAverage`]: fixed-window moving average used for per-contact
//!   position smoothing.
//! - [`to_hid_value`]: the noise gate + scale + saturate transform from
//!   filtered deltas to HID report values.
//! - [`ScrollAccumulator`]: fractional scroll rollover that turns sub-unit
//!   scroll intents into a sparse −1/0/+1 detent stream.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod average;
pub mod noise_gate;
pub mod scroll;

pub use average::SimpleAverage;
pub use noise_gate::to_hid_value;
pub use scroll::ScrollAccumulator;
