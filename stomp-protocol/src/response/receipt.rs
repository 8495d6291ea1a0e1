use crate::response::expect_command;
use crate::{Command, Frame, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub receipt_id: String,
}

impl Receipt {
    pub fn from_frame(frame: Frame) -> Result<Self, ProtocolError> {
        let frame = expect_command(frame, Command::Receipt)?;
        let receipt_id = frame
            .header("receipt-id")
            .ok_or(ProtocolError::MissingHeader {
                command: "RECEIPT",
                header: "receipt-id",
            })?
            .to_string();

        Ok(Receipt { receipt_id })
    }

    /// Fails unless this receipt answers the request tagged `expected`.
    pub fn matching(self, expected: &str) -> Result<Self, ProtocolError> {
        if self.receipt_id != expected {
            return Err(ProtocolError::ReceiptMismatch {
                expected: expected.to_string(),
                found: self.receipt_id,
            });
        }
        Ok(self)
    }
}
