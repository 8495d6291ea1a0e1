use bytes::Bytes;
use stomp_client::{server_host, Credentials, Dialer, StompClient, Transport};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use crate::config::BrokerParams;
use crate::constants::{DEMO_CONTENT_TYPE, DEMO_MESSAGE, DEMO_QUEUE};
use crate::error::PublishError;

/// Lifecycle of one publish. `Closed` is terminal whether or not the publish
/// succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Unconnected,
    TransportOpen,
    Authenticated,
    MessagePublished,
    Closed,
}

#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub destination: String,
    pub content_type: String,
    pub body: Bytes,
}

impl OutboundMessage {
    pub fn demo() -> Self {
        OutboundMessage {
            destination: DEMO_QUEUE.to_string(),
            content_type: DEMO_CONTENT_TYPE.to_string(),
            body: Bytes::from_static(DEMO_MESSAGE.as_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub destination: String,
    pub receipt_id: String,
    pub body: Bytes,
}

pub struct BrokerPublisher {
    target: String,
    credentials: Credentials,
    message: OutboundMessage,
    state: PublishState,
    history: Vec<PublishState>,
}

impl BrokerPublisher {
    pub fn new(params: &BrokerParams, message: OutboundMessage) -> Self {
        BrokerPublisher {
            target: params.dial_target().to_string(),
            credentials: params.credentials(),
            message,
            state: PublishState::Unconnected,
            history: vec![PublishState::Unconnected],
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> PublishState {
        self.state
    }

    /// Every state entered so far, starting with `Unconnected`.
    pub fn history(&self) -> &[PublishState] {
        &self.history
    }

    fn transition(&mut self, next: PublishState) {
        debug!(from = ?self.state, to = ?next, "publisher state");
        self.state = next;
        self.history.push(next);
    }

    /// Dials, authenticates, sends the message once and tears everything
    /// down. The transport is closed on every path after a successful dial.
    pub async fn publish<D: Dialer>(&mut self, dialer: &D) -> Result<PublishReceipt, PublishError> {
        if self.state != PublishState::Unconnected {
            return Err(PublishError::AlreadyUsed);
        }

        let stream = match dialer.dial(&self.target).await {
            Ok(stream) => stream,
            Err(source) => {
                self.transition(PublishState::Closed);
                return Err(PublishError::Transport {
                    target: self.target.clone(),
                    source,
                });
            }
        };
        let mut transport = Transport::new(stream, self.target.as_str());
        self.transition(PublishState::TransportOpen);
        info!(peer = %self.target, "transport open");

        let outcome = self.run_session(&mut transport).await;

        transport.close().await;
        self.transition(PublishState::Closed);
        outcome
    }

    /// The session is disconnected on every path once CONNECT succeeds.
    async fn run_session<S>(
        &mut self,
        transport: &mut Transport<S>,
    ) -> Result<PublishReceipt, PublishError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let host = server_host(transport.peer()).to_string();
        let mut client = StompClient::connect(transport.stream_mut(), &host, &self.credentials)
            .await
            .map_err(PublishError::Authentication)?;
        self.transition(PublishState::Authenticated);
        info!("connection established");

        let sent = client
            .send(
                &self.message.destination,
                &self.message.content_type,
                self.message.body.clone(),
            )
            .await
            .map_err(PublishError::Publish);
        if sent.is_ok() {
            self.transition(PublishState::MessagePublished);
        }

        if let Err(e) = client.disconnect().await {
            warn!(error = %e, "disconnect did not complete cleanly");
        }

        let receipt = sent?;
        Ok(PublishReceipt {
            destination: self.message.destination.clone(),
            receipt_id: receipt.receipt_id,
            body: self.message.body.clone(),
        })
    }
}
