use std::io;
use stomp_protocol::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Invalid broker configuration: {0}")]
    Config(#[from] clap::Error),

    #[error("Failed to open transport to {target}: {source}")]
    Transport {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to connect to the broker: {0}")]
    Authentication(#[source] ProtocolError),

    #[error("Failed to send message: {0}")]
    Publish(#[source] ProtocolError),

    #[error("Publisher already ran; create a new one per invocation")]
    AlreadyUsed,
}
