use crate::ProtocolError;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Connect,
    Stomp,
    Connected,
    Send,
    Receipt,
    Error,
    Disconnect,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Stomp => "STOMP",
            Command::Connected => "CONNECTED",
            Command::Send => "SEND",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
            Command::Disconnect => "DISCONNECT",
        }
    }

    /// CONNECT and CONNECTED headers are sent verbatim so that 1.0 peers
    /// can still negotiate a version.
    pub fn escapes_headers(&self) -> bool {
        !matches!(self, Command::Connect | Command::Connected)
    }
}

impl TryFrom<&str> for Command {
    type Error = ProtocolError;

    fn try_from(value: &str) -> Result<Self, ProtocolError> {
        match value {
            "CONNECT" => Ok(Command::Connect),
            "STOMP" => Ok(Command::Stomp),
            "CONNECTED" => Ok(Command::Connected),
            "SEND" => Ok(Command::Send),
            "RECEIPT" => Ok(Command::Receipt),
            "ERROR" => Ok(Command::Error),
            "DISCONNECT" => Ok(Command::Disconnect),
            _ => Err(ProtocolError::UnknownCommand(value.to_string())),
        }
    }
}
