use crate::response::expect_command;
use crate::{Command, Frame, ProtocolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connected {
    pub version: String,
    pub server: Option<String>,
    pub session: Option<String>,
    pub heart_beat: (u32, u32),
}

impl Connected {
    pub fn from_frame(frame: Frame) -> Result<Self, ProtocolError> {
        let frame = expect_command(frame, Command::Connected)?;

        // 1.0 brokers do not send a version header
        let version = frame.header("version").unwrap_or("1.0").to_string();
        let heart_beat = frame
            .header("heart-beat")
            .and_then(|hb| hb.split_once(','))
            .and_then(|(cx, cy)| Some((cx.trim().parse().ok()?, cy.trim().parse().ok()?)))
            .unwrap_or((0, 0));

        Ok(Connected {
            version,
            server: frame.header("server").map(str::to_string),
            session: frame.header("session").map(str::to_string),
            heart_beat,
        })
    }
}
