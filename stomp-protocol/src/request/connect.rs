use crate::{Command, Frame};

pub const ACCEPT_VERSIONS: &str = "1.0,1.1,1.2";

#[derive(Debug)]
pub struct ConnectRequest {
    pub host: String,
    pub login: String,
    pub passcode: String,
    /// `(cx, cy)` in milliseconds; `(0, 0)` disables heart-beating.
    pub heart_beat: (u32, u32),
}

impl ConnectRequest {
    pub fn new(host: impl Into<String>, login: impl Into<String>, passcode: impl Into<String>) -> Self {
        ConnectRequest {
            host: host.into(),
            login: login.into(),
            passcode: passcode.into(),
            heart_beat: (0, 0),
        }
    }

    pub fn to_frame(&self) -> Frame {
        Frame::new(Command::Connect)
            .with_header("accept-version", ACCEPT_VERSIONS)
            .with_header("host", self.host.as_str())
            .with_header("login", self.login.as_str())
            .with_header("passcode", self.passcode.as_str())
            .with_header(
                "heart-beat",
                format!("{},{}", self.heart_beat.0, self.heart_beat.1),
            )
    }
}
