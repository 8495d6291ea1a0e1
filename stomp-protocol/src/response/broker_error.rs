use crate::{Frame, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerError {
    pub message: String,
    pub receipt_id: Option<String>,
    pub details: String,
}

impl BrokerError {
    pub fn from_frame(frame: &Frame) -> Self {
        let details = String::from_utf8_lossy(&frame.body).trim_end().to_string();
        let message = match frame.header("message") {
            Some(m) => m.to_string(),
            None if !details.is_empty() => details.clone(),
            None => "unspecified broker error".to_string(),
        };

        BrokerError {
            message,
            receipt_id: frame.header("receipt-id").map(str::to_string),
            details,
        }
    }
}

impl From<BrokerError> for ProtocolError {
    fn from(err: BrokerError) -> Self {
        ProtocolError::Broker {
            message: err.message,
            details: err.details,
        }
    }
}
