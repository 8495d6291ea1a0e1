use bytes::Bytes;
use crate::{Command, Frame};

#[derive(Debug)]
pub struct SendRequest {
    pub destination: String,
    pub content_type: String,
    pub body: Bytes,
    pub receipt: Option<String>,
}

impl SendRequest {
    pub fn to_frame(&self) -> Frame {
        let mut frame = Frame::new(Command::Send)
            .with_header("destination", self.destination.as_str())
            .with_header("content-type", self.content_type.as_str())
            .with_header("content-length", self.body.len().to_string());
        if let Some(receipt) = &self.receipt {
            frame = frame.with_header("receipt", receipt.as_str());
        }
        frame.with_body(self.body.clone())
    }
}
