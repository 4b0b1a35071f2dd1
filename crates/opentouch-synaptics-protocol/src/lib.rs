//! Synaptics PS/2 absolute-mode protocol primitives.
//!
//! This crate is intentionally small and I/O-free so the gesture engine can
//! consume hardware-validated framing and decoding logic without pulling in
//! runtime concerns. It covers three things:
//!
//! - **Framing** ([`PacketFramer`]): accumulates transport bytes into 6-byte
//!   absolute-mode packets, resynchronizing on the fixed sync patterns in
//!   bytes 0 and 3. The upstream link is lossy; a sync mismatch is recovery
//!   work, not an error.
//! - **Decoding** ([`decode`]): classifies a raw packet into primary,
//!   secondary/extended, finger-count, or pass-through packets and extracts
//!   the bit-scattered coordinate, pressure, and width fields. The bit
//!   offsets are a frozen hardware contract; see the byte-for-byte test
//!   vectors in `tests/decode_vectors.rs`.
//! - **Initialization** ([`device::initialize`]): the query and mode-entry
//!   command sequence over a caller-supplied [`device::Ps2Transport`],
//!   returning the identity, capability, and resolution data the gesture
//!   configuration is derived from.
//!
//! No packet ever fails to decode: unknown or reserved encodings degrade to
//! [`PacketKind::PassThrough`] and are dropped by the engine.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod commands;
pub mod decode;
pub mod device;
pub mod packet;

pub use decode::{PacketKind, decode};
pub use device::{Capabilities, DeviceInfo, Ps2Transport, TransportError};
pub use packet::{PacketFramer, RawPacket};
