pub mod frame;
pub mod command;
pub mod errors;
mod request;
mod response;
mod utils;

// Public re-exports for easy access
pub use frame::{Frame, MAX_FRAME_BYTES};
pub use command::Command;
pub use errors::ProtocolError;

pub use request::{ConnectRequest, DisconnectRequest, SendRequest};
pub use response::{BrokerError, Connected, Receipt};

pub use utils::{escape_header, unescape_header};
