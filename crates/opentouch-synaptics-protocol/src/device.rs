//! Device identification queries and the extended-mode entry sequence.
//!
//! Everything here is pure protocol over a caller-supplied [`Ps2Transport`];
//! the crate never touches hardware. [`initialize`] runs once at startup,
//! before the streaming pipeline exists; the gesture core never issues
//! commands at runtime.

use thiserror::Error;
use tracing::{info, warn};

use crate::commands;

/// Special-command byte selecting absolute mode, high packet rate, and
/// W-field reporting.
pub const MODE_ABSOLUTE_HIGH_RATE_W: u8 = 0xC5;
/// Special-command byte that, together with a sample rate of 200, enables
/// extended-W (multi-finger) packets. The two-step knock sequence comes from
/// the VoodooPS2 Synaptics driver; plain mode-byte writes leave some pads
/// without extended packets.
pub const MODE_EXTENDED_W: u8 = 0x03;

/// Sample rate written alongside [`MODE_ABSOLUTE_HIGH_RATE_W`].
pub const RATE_MODE_KNOCK: u8 = 0x14;
/// Sample rate written alongside [`MODE_EXTENDED_W`].
pub const RATE_EXTENDED_KNOCK: u8 = 0xC8;

/// Information query selectors.
pub mod queries {
    /// Firmware identity.
    pub const IDENTITY: u8 = 0x00;
    /// Capability bits.
    pub const CAPABILITIES: u8 = 0x02;
    /// Device resolution in units per millimetre.
    pub const RESOLUTION: u8 = 0x08;
    /// Extended model bits, including the clickpad type.
    pub const EXTENDED_MODEL: u8 = 0x0C;
}

/// Synchronous command primitive offered by the byte transport.
///
/// `command` is one of the [`crate::commands`] identifiers: the
/// implementation writes the opcode plus [`commands::args_len`] argument
/// bytes and reads [`commands::result_len`] response bytes into `result`.
/// Implementations must be blocking; initialization runs before streaming
/// starts, so there is nothing to contend with.
pub trait Ps2Transport {
    /// Execute one command exchange.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the device does not acknowledge the
    /// command or the exchange times out.
    fn command(&mut self, command: u16, args: &[u8], result: &mut [u8])
    -> Result<(), TransportError>;
}

/// Failures of the synchronous command exchange.
///
/// Streaming-side framing problems are deliberately *not* represented here;
/// those are self-recovering and never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The device answered something other than ACK.
    #[error("device did not acknowledge command {command:#04x}")]
    Nack {
        /// Opcode of the rejected command.
        command: u8,
    },
    /// The device stopped clocking mid-exchange.
    #[error("transport timed out waiting for the device")]
    Timeout,
    /// A response byte arrived with bad parity or framing.
    #[error("response byte failed parity or framing checks")]
    Parity,
}

/// Firmware version reported by the identity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

/// Capability bits from query `0x02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Extended capability queries are implemented.
    pub extended: bool,
    /// Number of extended queries available beyond the base set.
    pub extended_queries: u8,
    /// A physical middle button exists.
    pub middle_button: bool,
    /// Four-button (W = 2 encoded) reporting.
    pub four_buttons: bool,
    /// Multi-finger reporting.
    pub multi_finger: bool,
    /// Palm detection.
    pub palm_detect: bool,
}

/// Device resolution from query `0x08`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// X units per millimetre.
    pub units_per_mm_x: u8,
    /// Y units per millimetre.
    pub units_per_mm_y: u8,
}

/// Clickpad flavour from the extended model query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickpadType {
    /// Separate physical buttons.
    NotClickpad,
    /// One integrated button under the whole surface.
    OneButton,
    /// Two integrated buttons.
    TwoButton,
    /// Reserved encoding.
    Reserved,
}

/// Extended model bits from query `0x0C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedModel {
    /// Covered-pad gesture support.
    pub covered_pad_gesture: bool,
    /// Clickpad flavour.
    pub clickpad_type: ClickpadType,
    /// Advanced gesture mode support.
    pub advanced_gesture: bool,
    /// ClearPad series hardware.
    pub clearpad: bool,
}

/// Everything learned during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Firmware identity.
    pub identity: Identity,
    /// Capability bits.
    pub capabilities: Capabilities,
    /// Device resolution; feeds the gesture configuration.
    pub resolution: Resolution,
    /// Extended model bits.
    pub extended_model: ExtendedModel,
}

/// Parse the identity query result.
pub fn parse_identity(result: [u8; 3]) -> Identity {
    Identity {
        major: result[2] & 0x0F,
        minor: result[0],
    }
}

/// Parse the capability query result.
pub fn parse_capabilities(result: [u8; 3]) -> Capabilities {
    let extended = result[0] & 0x80 != 0;
    let mut extended_queries = (result[0] >> 4) & 0x07;
    if extended_queries >= 1 {
        extended_queries += 8;
    }
    Capabilities {
        extended,
        extended_queries,
        middle_button: result[0] & 0x04 != 0,
        four_buttons: result[2] & 0x08 != 0,
        multi_finger: result[2] & 0x02 != 0,
        palm_detect: result[2] & 0x01 != 0,
    }
}

/// Parse the resolution query result.
pub fn parse_resolution(result: [u8; 3]) -> Resolution {
    Resolution {
        units_per_mm_x: result[0],
        units_per_mm_y: result[2],
    }
}

/// Parse the extended model query result.
pub fn parse_extended_model(result: [u8; 3]) -> ExtendedModel {
    let type_code = ((result[0] >> 4) & 0x01) | ((result[1] << 1) & 0x02);
    ExtendedModel {
        covered_pad_gesture: result[0] & 0x80 != 0,
        clickpad_type: match type_code {
            0 => ClickpadType::NotClickpad,
            1 => ClickpadType::OneButton,
            2 => ClickpadType::TwoButton,
            _ => ClickpadType::Reserved,
        },
        advanced_gesture: result[0] & 0x08 != 0,
        clearpad: result[0] & 0x04 != 0,
    }
}

/// Write a Synaptics special-command byte via four resolution writes.
///
/// # Errors
///
/// Propagates the first [`TransportError`] from the underlying commands.
pub fn special_command<T: Ps2Transport>(transport: &mut T, value: u8) -> Result<(), TransportError> {
    for pair in commands::encode_special_command(value) {
        transport.command(commands::SETRES, &[pair], &mut [])?;
    }
    Ok(())
}

/// Run an information query: special command with the selector, then GETINFO.
///
/// # Errors
///
/// Propagates the first [`TransportError`] from the underlying commands.
pub fn status_request<T: Ps2Transport>(
    transport: &mut T,
    selector: u8,
) -> Result<[u8; 3], TransportError> {
    special_command(transport, selector)?;
    let mut result = [0u8; 3];
    transport.command(commands::GETINFO, &[], &mut result)?;
    Ok(result)
}

/// Identify the device and switch it into extended absolute reporting.
///
/// Queries identity, capabilities, resolution, and the extended model bits,
/// then runs the two-step mode-entry knock (scale-1:1 twice, special
/// command, sample rate) for absolute high-rate W mode and extended-W mode,
/// bracketed by disable/enable.
///
/// # Errors
///
/// Propagates the first [`TransportError`]; a device that fails mid-sequence
/// is left disabled rather than half-configured.
pub fn initialize<T: Ps2Transport>(transport: &mut T) -> Result<DeviceInfo, TransportError> {
    let identity = parse_identity(status_request(transport, queries::IDENTITY)?);
    let capabilities = parse_capabilities(status_request(transport, queries::CAPABILITIES)?);
    let resolution = parse_resolution(status_request(transport, queries::RESOLUTION)?);
    let extended_model = parse_extended_model(status_request(transport, queries::EXTENDED_MODEL)?);

    info!(
        version_major = identity.major,
        version_minor = identity.minor,
        units_per_mm_x = resolution.units_per_mm_x,
        units_per_mm_y = resolution.units_per_mm_y,
        clickpad_type = ?extended_model.clickpad_type,
        "identified touchpad"
    );
    if !capabilities.multi_finger {
        warn!("device does not report multi-finger capability; scrolling will be unavailable");
    }

    transport.command(commands::DISABLE, &[], &mut [])?;

    transport.command(commands::SETSCALE11, &[], &mut [])?;
    transport.command(commands::SETSCALE11, &[], &mut [])?;
    special_command(transport, MODE_ABSOLUTE_HIGH_RATE_W)?;
    transport.command(commands::SETRATE, &[RATE_MODE_KNOCK], &mut [])?;

    transport.command(commands::SETSCALE11, &[], &mut [])?;
    transport.command(commands::SETSCALE11, &[], &mut [])?;
    special_command(transport, MODE_EXTENDED_W)?;
    transport.command(commands::SETRATE, &[RATE_EXTENDED_KNOCK], &mut [])?;

    transport.command(commands::ENABLE, &[], &mut [])?;

    Ok(DeviceInfo {
        identity,
        capabilities,
        resolution,
        extended_model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_parses_major_and_minor() {
        let identity = parse_identity([0x2F, 0x47, 0x18]);
        assert_eq!(identity.major, 8);
        assert_eq!(identity.minor, 0x2F);
    }

    #[test]
    fn capabilities_extends_query_count() {
        let caps = parse_capabilities([0xD4, 0x00, 0x0B]);
        assert!(caps.extended);
        assert_eq!(caps.extended_queries, 5 + 8);
        assert!(caps.middle_button);
        assert!(caps.four_buttons);
        assert!(caps.multi_finger);
        assert!(caps.palm_detect);

        let caps = parse_capabilities([0x80, 0x00, 0x00]);
        assert_eq!(caps.extended_queries, 0);
    }

    #[test]
    fn resolution_reads_outer_bytes() {
        let res = parse_resolution([47, 0x80, 45]);
        assert_eq!(res.units_per_mm_x, 47);
        assert_eq!(res.units_per_mm_y, 45);
    }

    #[test]
    fn extended_model_assembles_clickpad_type() {
        let model = parse_extended_model([0x10, 0x00, 0x00]);
        assert_eq!(model.clickpad_type, ClickpadType::OneButton);

        let model = parse_extended_model([0x00, 0x01, 0x00]);
        assert_eq!(model.clickpad_type, ClickpadType::TwoButton);

        let model = parse_extended_model([0x8C, 0x00, 0x00]);
        assert_eq!(model.clickpad_type, ClickpadType::NotClickpad);
        assert!(model.covered_pad_gesture);
        assert!(model.advanced_gesture);
        assert!(model.clearpad);
    }
}
