use stomp_client::{Dialer, TlsDialer};
use tracing::{error, info};

use crate::config::BrokerParams;
use crate::constants::SUCCESS_BODY;
use crate::error::PublishError;
use crate::publisher::{BrokerPublisher, OutboundMessage};
use crate::types::{Request, Response};

/// Platform entry point: reads the broker parameters from the environment
/// and publishes over TLS.
pub async fn handle(request: &Request) -> (Response, Option<PublishError>) {
    let params = match BrokerParams::from_env() {
        Ok(params) => params,
        Err(e) => return failure(PublishError::from(e)),
    };

    let dialer = match TlsDialer::new() {
        Ok(dialer) => dialer,
        Err(source) => {
            return failure(PublishError::Transport {
                target: params.dial_target().to_string(),
                source,
            })
        }
    };

    handle_with(&dialer, &params, request).await
}

/// Runs one invocation against the given dialer. Every failure becomes a
/// 500 carrying the error text; the request envelope is not consulted.
pub async fn handle_with<D: Dialer>(
    dialer: &D,
    params: &BrokerParams,
    _request: &Request,
) -> (Response, Option<PublishError>) {
    let mut publisher = BrokerPublisher::new(params, OutboundMessage::demo());
    info!(endpoint = %publisher.target(), "invocation started");

    match publisher.publish(dialer).await {
        Ok(receipt) => {
            info!(
                destination = %receipt.destination,
                receipt = %receipt.receipt_id,
                "Message sent to the queue: {}",
                String::from_utf8_lossy(&receipt.body)
            );
            (Response::ok(SUCCESS_BODY), None)
        }
        Err(e) => failure(e),
    }
}

fn failure(e: PublishError) -> (Response, Option<PublishError>) {
    error!(error = %e, "invocation failed");
    (Response::internal_error(e.to_string()), Some(e))
}
