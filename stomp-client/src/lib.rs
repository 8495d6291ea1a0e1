pub mod client;
pub mod transport;

pub use client::{Credentials, StompClient};
pub use transport::{server_host, Dialer, TlsDialer, Transport};
