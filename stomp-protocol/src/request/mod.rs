pub mod connect;
pub mod send;
mod disconnect;

pub use connect::ConnectRequest;
pub use send::SendRequest;
pub use disconnect::DisconnectRequest;
