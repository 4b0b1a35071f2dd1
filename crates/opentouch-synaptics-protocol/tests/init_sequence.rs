//! Initialization sequence tests against a scripted transport.

use opentouch_synaptics_protocol::device::{
    self, ClickpadType, Ps2Transport, TransportError, queries,
};
use opentouch_synaptics_protocol::commands;

/// Records every exchange and replays canned GETINFO responses.
#[derive(Debug, Default)]
struct ScriptedTransport {
    log: Vec<(u16, Vec<u8>)>,
    info_responses: Vec<[u8; 3]>,
    fail_after: Option<usize>,
}

impl ScriptedTransport {
    fn with_responses(responses: &[[u8; 3]]) -> Self {
        Self {
            info_responses: responses.to_vec(),
            ..Self::default()
        }
    }
}

impl Ps2Transport for ScriptedTransport {
    fn command(
        &mut self,
        command: u16,
        args: &[u8],
        result: &mut [u8],
    ) -> Result<(), TransportError> {
        if let Some(limit) = self.fail_after
            && self.log.len() >= limit
        {
            return Err(TransportError::Timeout);
        }
        self.log.push((command, args.to_vec()));
        if command == commands::GETINFO {
            let response = self.info_responses.remove(0);
            result.copy_from_slice(&response);
        }
        Ok(())
    }
}

/// The four SETRES writes that smuggle `value` through, as log entries.
fn special(value: u8) -> Vec<(u16, Vec<u8>)> {
    commands::encode_special_command(value)
        .iter()
        .map(|pair| (commands::SETRES, vec![*pair]))
        .collect()
}

#[test]
fn status_request_runs_selector_then_getinfo() {
    let mut transport = ScriptedTransport::with_responses(&[[0x11, 0x22, 0x33]]);
    let result = device::status_request(&mut transport, queries::RESOLUTION).unwrap();
    assert_eq!(result, [0x11, 0x22, 0x33]);

    let mut expected = special(queries::RESOLUTION);
    expected.push((commands::GETINFO, vec![]));
    assert_eq!(transport.log, expected);
}

#[test]
fn initialize_issues_the_full_sequence() {
    let mut transport = ScriptedTransport::with_responses(&[
        [0x2F, 0x47, 0x18], // identity: 8.47
        [0xD4, 0x00, 0x0B], // capabilities
        [47, 0x80, 45],     // resolution
        [0x1C, 0x00, 0x00], // extended model: one-button clickpad
    ]);

    let info = device::initialize(&mut transport).unwrap();
    assert_eq!(info.identity.major, 8);
    assert_eq!(info.resolution.units_per_mm_x, 47);
    assert_eq!(info.resolution.units_per_mm_y, 45);
    assert_eq!(info.extended_model.clickpad_type, ClickpadType::OneButton);
    assert!(info.capabilities.multi_finger);

    let mut expected = Vec::new();
    for selector in [
        queries::IDENTITY,
        queries::CAPABILITIES,
        queries::RESOLUTION,
        queries::EXTENDED_MODEL,
    ] {
        expected.extend(special(selector));
        expected.push((commands::GETINFO, vec![]));
    }
    expected.push((commands::DISABLE, vec![]));
    expected.push((commands::SETSCALE11, vec![]));
    expected.push((commands::SETSCALE11, vec![]));
    expected.extend(special(device::MODE_ABSOLUTE_HIGH_RATE_W));
    expected.push((commands::SETRATE, vec![device::RATE_MODE_KNOCK]));
    expected.push((commands::SETSCALE11, vec![]));
    expected.push((commands::SETSCALE11, vec![]));
    expected.extend(special(device::MODE_EXTENDED_W));
    expected.push((commands::SETRATE, vec![device::RATE_EXTENDED_KNOCK]));
    expected.push((commands::ENABLE, vec![]));

    assert_eq!(transport.log, expected);
}

#[test]
fn initialize_propagates_transport_failures() {
    let mut transport = ScriptedTransport::with_responses(&[[0x2F, 0x47, 0x18]]);
    // Fail on the first command of the capabilities query.
    transport.fail_after = Some(5);

    let err = device::initialize(&mut transport).unwrap_err();
    assert_eq!(err, TransportError::Timeout);
}
