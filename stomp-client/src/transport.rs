use std::future::Future;
use std::io;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::{debug, warn};

/// Opens the byte stream a STOMP session runs over.
pub trait Dialer {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    fn dial(&self, target: &str) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// TLS over TCP, verified against the Mozilla root bundle.
#[derive(Clone)]
pub struct TlsDialer {
    connector: TlsConnector,
}

impl TlsDialer {
    pub fn new() -> io::Result<Self> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(io::Error::other)?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(TlsDialer {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }
}

impl Dialer for TlsDialer {
    type Stream = TlsStream<TcpStream>;

    async fn dial(&self, target: &str) -> io::Result<Self::Stream> {
        let server_name = ServerName::try_from(server_host(target))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
            .to_owned();

        let tcp = TcpStream::connect(target).await?;
        debug!(peer = target, "tcp connected, starting tls handshake");

        let tls = self.connector.connect(server_name, tcp).await?;
        debug!(peer = target, "tls handshake complete");
        Ok(tls)
    }
}

/// Host part of a `host:port` dial target, IPv6 brackets removed.
pub fn server_host(target: &str) -> &str {
    let host = match target.rsplit_once(':') {
        Some((host, port)) if port.parse::<u16>().is_ok() => host,
        _ => target,
    };
    host.trim_start_matches('[').trim_end_matches(']')
}

/// An open stream owned by one invocation.
pub struct Transport<S> {
    stream: S,
    peer: String,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Transport<S> {
    pub fn new(stream: S, peer: impl Into<String>) -> Self {
        Transport {
            stream,
            peer: peer.into(),
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Shuts the stream down. The stream is dropped either way, so a failed
    /// shutdown is only logged.
    pub async fn close(mut self) {
        match self.stream.shutdown().await {
            Ok(()) => debug!(peer = %self.peer, "transport closed"),
            Err(e) => warn!(peer = %self.peer, error = %e, "transport close failed"),
        }
    }
}
