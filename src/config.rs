use std::fmt;

use clap::Parser;
use stomp_client::Credentials;

/// Broker connection parameters. Every field falls back to its environment
/// variable; absent values stay empty and surface later as a connection
/// failure.
#[derive(Parser, Clone)]
#[command(name = "mq-publish", about = "Publish one message to a STOMP broker over TLS")]
pub struct BrokerParams {
    /// Broker endpoint, optionally prefixed with a scheme such as `stomp+ssl://`.
    #[arg(long, env = "MQ_ENDPOINT_IP", default_value = "")]
    pub endpoint: String,

    #[arg(long, env = "BROKER_USERNAME", default_value = "")]
    pub username: String,

    #[arg(long, env = "BROKER_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,
}

impl BrokerParams {
    /// Reads the parameters from the process environment alone, ignoring argv.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from([env!("CARGO_PKG_NAME")])
    }

    /// `host:port` to dial, with any scheme prefix removed.
    pub fn dial_target(&self) -> &str {
        strip_scheme(&self.endpoint)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            login: self.username.clone(),
            passcode: self.password.clone(),
        }
    }
}

impl fmt::Debug for BrokerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerParams")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn strip_scheme(endpoint: &str) -> &str {
    match endpoint.split_once("://") {
        Some((_, rest)) => rest,
        None => endpoint,
    }
}
