pub mod connected;
pub mod receipt;
mod broker_error;

pub use broker_error::BrokerError;
pub use connected::Connected;
pub use receipt::Receipt;

use crate::{Command, Frame, ProtocolError};

/// ERROR frames become `ProtocolError::Broker`, anything else unexpected is
/// reported by command name.
pub(crate) fn expect_command(frame: Frame, expected: Command) -> Result<Frame, ProtocolError> {
    if frame.command == expected {
        return Ok(frame);
    }
    if frame.command == Command::Error {
        return Err(BrokerError::from_frame(&frame).into());
    }
    Err(ProtocolError::UnexpectedFrame {
        expected: expected.as_str(),
        found: frame.command.as_str(),
    })
}
