use std::fmt;

use bytes::{Bytes, BytesMut};
use stomp_protocol::{
    ConnectRequest, Connected, DisconnectRequest, Frame, ProtocolError, Receipt, SendRequest,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub passcode: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("passcode", &"<redacted>")
            .finish()
    }
}

/// An authenticated STOMP session borrowing its transport. Dropping it
/// leaves the transport open; call [`StompClient::disconnect`] to end the
/// session cleanly.
pub struct StompClient<'a, S> {
    stream: &'a mut S,
    buf: BytesMut,
    connected: Connected,
    receipt_seq: u32,
}

impl<'a, S> StompClient<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub async fn connect(
        stream: &'a mut S,
        host: &str,
        credentials: &Credentials,
    ) -> Result<Self, ProtocolError> {
        let request = ConnectRequest::new(
            host,
            credentials.login.as_str(),
            credentials.passcode.as_str(),
        );
        write_frame(&mut *stream, &request.to_frame()).await?;

        let mut buf = BytesMut::with_capacity(4096);
        let reply = read_frame(&mut *stream, &mut buf).await?;
        let connected = Connected::from_frame(reply)?;

        debug!(
            version = %connected.version,
            session = ?connected.session,
            server = ?connected.server,
            "stomp session established"
        );

        Ok(StompClient {
            stream,
            buf,
            connected,
            receipt_seq: 0,
        })
    }

    pub fn connected(&self) -> &Connected {
        &self.connected
    }

    fn next_receipt(&mut self, prefix: &str) -> String {
        self.receipt_seq = self.receipt_seq.wrapping_add(1);
        format!("{}-{}", prefix, self.receipt_seq)
    }

    /// Publishes one message and waits for the broker's receipt.
    pub async fn send(
        &mut self,
        destination: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<Receipt, ProtocolError> {
        let receipt = self.next_receipt("send");
        let request = SendRequest {
            destination: destination.to_string(),
            content_type: content_type.to_string(),
            body,
            receipt: Some(receipt.clone()),
        };

        write_frame(&mut *self.stream, &request.to_frame()).await?;
        let reply = read_frame(&mut *self.stream, &mut self.buf).await?;

        Receipt::from_frame(reply)?.matching(&receipt)
    }

    pub async fn disconnect(mut self) -> Result<(), ProtocolError> {
        let receipt = self.next_receipt("disconnect");
        let request = DisconnectRequest {
            receipt: receipt.clone(),
        };

        write_frame(&mut *self.stream, &request.to_frame()).await?;
        let reply = read_frame(&mut *self.stream, &mut self.buf).await?;
        Receipt::from_frame(reply)?.matching(&receipt)?;

        debug!("stomp session disconnected");
        Ok(())
    }
}

async fn write_frame<S>(stream: &mut S, frame: &Frame) -> Result<(), ProtocolError>
where
    S: AsyncWrite + Unpin,
{
    let mut out = BytesMut::new();
    frame.encode(&mut out);
    stream.write_all(&out).await?;
    stream.flush().await?;
    debug!(command = frame.command.as_str(), "frame sent");
    Ok(())
}

async fn read_frame<S>(stream: &mut S, buf: &mut BytesMut) -> Result<Frame, ProtocolError>
where
    S: AsyncRead + Unpin,
{
    loop {
        if let Some(frame) = Frame::decode(buf)? {
            debug!(command = frame.command.as_str(), "frame received");
            return Ok(frame);
        }

        buf.reserve(4096);
        let n = stream.read_buf(buf).await?;
        if n == 0 {
            return Err(ProtocolError::ConnectionClosed);
        }
    }
}
