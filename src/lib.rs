pub mod config;
pub mod constants;
mod error;
pub mod handler;
pub mod publisher;
pub mod types;

pub use config::BrokerParams;
pub use error::PublishError;
pub use handler::{handle, handle_with};
pub use publisher::{BrokerPublisher, OutboundMessage, PublishReceipt, PublishState};
pub use types::{Request, Response};
