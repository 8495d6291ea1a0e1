use crate::{Command, Frame};

#[derive(Debug)]
pub struct DisconnectRequest {
    pub receipt: String,
}

impl DisconnectRequest {
    pub fn to_frame(&self) -> Frame {
        Frame::new(Command::Disconnect).with_header("receipt", self.receipt.as_str())
    }
}
