use std::io::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Frame of {size} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { size: usize, limit: usize },

    #[error("Missing header `{header}` on {command} frame")]
    MissingHeader {
        command: &'static str,
        header: &'static str,
    },

    #[error("Unexpected {found} frame, expected {expected}")]
    UnexpectedFrame {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Receipt mismatch expected: {expected} found: {found}")]
    ReceiptMismatch { expected: String, found: String },

    #[error("Broker error: {message}")]
    Broker { message: String, details: String },

    #[error("Connection closed by broker")]
    ConnectionClosed,

    #[error("IoError :{0}")]
    IoError(#[from] Error),
}
