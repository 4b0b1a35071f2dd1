//! PS/2 mouse command identifiers and Synaptics special-command encoding.
//!
//! Command identifiers pack the transfer shape into the high byte: bits
//! 15-12 are the number of argument bytes the host sends after the opcode,
//! bits 11-8 the number of result bytes the device returns. The low byte is
//! the opcode on the wire. This matches the encoding used by the Linux
//! psmouse driver, which keeps transport implementations trivially generic.

/// Set scaling 1:1.
pub const SETSCALE11: u16 = 0x00E6;
/// Set sample rate; one argument byte.
pub const SETRATE: u16 = 0x10F3;
/// Enable data reporting.
pub const ENABLE: u16 = 0x00F4;
/// Disable data reporting.
pub const DISABLE: u16 = 0x00F5;
/// Reset and run the self-test; returns BAT result and device ID.
pub const RESET_BAT: u16 = 0x02FF;
/// Set resolution; one argument byte. Repeated four times to smuggle a
/// Synaptics special-command byte past the standard PS/2 command set.
pub const SETRES: u16 = 0x10E8;
/// Information query; returns three bytes.
pub const GETINFO: u16 = 0x03E9;

/// Number of argument bytes the host sends for `command`.
pub fn args_len(command: u16) -> usize {
    usize::from((command >> 12) & 0x0F)
}

/// Number of result bytes the device returns for `command`.
pub fn result_len(command: u16) -> usize {
    usize::from((command >> 8) & 0x0F)
}

/// The opcode byte written to the wire for `command`.
pub fn opcode(command: u16) -> u8 {
    (command & 0xFF) as u8
}

/// Encode a Synaptics special-command byte as the four 2-bit resolution
/// arguments that carry it, most significant pair first.
pub fn encode_special_command(value: u8) -> [u8; 4] {
    [
        (value >> 6) & 0x03,
        (value >> 4) & 0x03,
        (value >> 2) & 0x03,
        value & 0x03,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_shape_matches_encoding() {
        assert_eq!(args_len(SETRATE), 1);
        assert_eq!(result_len(SETRATE), 0);
        assert_eq!(opcode(SETRATE), 0xF3);

        assert_eq!(args_len(GETINFO), 0);
        assert_eq!(result_len(GETINFO), 3);
        assert_eq!(opcode(GETINFO), 0xE9);

        assert_eq!(args_len(SETSCALE11), 0);
        assert_eq!(result_len(SETSCALE11), 0);
    }

    #[test]
    fn special_command_splits_into_bit_pairs() {
        assert_eq!(encode_special_command(0xC5), [3, 0, 1, 1]);
        assert_eq!(encode_special_command(0x03), [0, 0, 0, 3]);
        assert_eq!(encode_special_command(0x00), [0, 0, 0, 0]);
        assert_eq!(encode_special_command(0xFF), [3, 3, 3, 3]);
    }
}
