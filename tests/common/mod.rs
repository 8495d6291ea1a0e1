use std::io;
use std::sync::{Arc, Mutex};

use bytes::BytesMut;
use mq_publish::BrokerParams;
use stomp_client::Dialer;
use stomp_protocol::{Command, Frame};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::task::JoinHandle;

/// What the in-memory broker observed across every connection dialed to it.
#[derive(Debug, Clone, Default)]
pub struct BrokerLog {
    pub dialed: Vec<String>,
    pub connects: usize,
    pub published: Vec<Frame>,
    pub disconnects: usize,
    pub closed_connections: usize,
}

#[derive(Clone)]
struct Policy {
    login: String,
    passcode: String,
    rejected_destination: Option<String>,
}

/// A STOMP broker living on `tokio::io::duplex` pipes, one task per dial.
pub struct MemoryBroker {
    policy: Policy,
    unreachable: bool,
    log: Arc<Mutex<BrokerLog>>,
    sessions: Mutex<Vec<JoinHandle<()>>>,
}

impl MemoryBroker {
    pub fn new(login: &str, passcode: &str) -> Self {
        MemoryBroker {
            policy: Policy {
                login: login.to_string(),
                passcode: passcode.to_string(),
                rejected_destination: None,
            },
            unreachable: false,
            log: Arc::new(Mutex::new(BrokerLog::default())),
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting_destination(mut self, destination: &str) -> Self {
        self.policy.rejected_destination = Some(destination.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Waits for every served connection to end, then snapshots the log.
    pub async fn settle(&self) -> BrokerLog {
        let sessions = std::mem::take(&mut *self.sessions.lock().unwrap());
        for session in sessions {
            session.await.expect("broker session panicked");
        }
        self.log.lock().unwrap().clone()
    }
}

impl Dialer for MemoryBroker {
    type Stream = DuplexStream;

    async fn dial(&self, target: &str) -> io::Result<DuplexStream> {
        self.log.lock().unwrap().dialed.push(target.to_string());
        if self.unreachable {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }

        let (client, server) = tokio::io::duplex(8192);
        let handle = tokio::spawn(serve(server, self.policy.clone(), self.log.clone()));
        self.sessions.lock().unwrap().push(handle);
        Ok(client)
    }
}

async fn serve(mut stream: DuplexStream, policy: Policy, log: Arc<Mutex<BrokerLog>>) {
    let mut buf = BytesMut::new();

    while let Some(frame) = next_frame(&mut stream, &mut buf).await {
        let reply = match frame.command {
            Command::Connect | Command::Stomp => {
                log.lock().unwrap().connects += 1;
                let authorized = frame.header("login") == Some(policy.login.as_str())
                    && frame.header("passcode") == Some(policy.passcode.as_str());
                if authorized {
                    Some(
                        Frame::new(Command::Connected)
                            .with_header("version", "1.2")
                            .with_header("session", "memory-session"),
                    )
                } else {
                    Some(
                        Frame::new(Command::Error)
                            .with_header("message", "Authentication failed")
                            .with_body(bytes::Bytes::from_static(
                                b"User name or password is invalid.",
                            )),
                    )
                }
            }
            Command::Send => {
                let receipt = frame.header("receipt").map(str::to_string);
                let rejected = policy.rejected_destination.is_some()
                    && frame.header("destination") == policy.rejected_destination.as_deref();
                if rejected {
                    let mut error = Frame::new(Command::Error)
                        .with_header("message", "Destination rejected");
                    if let Some(id) = receipt {
                        error = error.with_header("receipt-id", id);
                    }
                    Some(error)
                } else {
                    log.lock().unwrap().published.push(frame);
                    receipt.map(|id| Frame::new(Command::Receipt).with_header("receipt-id", id))
                }
            }
            Command::Disconnect => {
                log.lock().unwrap().disconnects += 1;
                frame
                    .header("receipt")
                    .map(|id| Frame::new(Command::Receipt).with_header("receipt-id", id))
            }
            _ => None,
        };

        if let Some(reply) = reply {
            let mut out = BytesMut::new();
            reply.encode(&mut out);
            if stream.write_all(&out).await.is_err() {
                break;
            }
        }
    }

    log.lock().unwrap().closed_connections += 1;
}

async fn next_frame(stream: &mut DuplexStream, buf: &mut BytesMut) -> Option<Frame> {
    loop {
        if let Some(frame) = Frame::decode(buf).ok()? {
            return Some(frame);
        }
        match stream.read_buf(buf).await {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

pub fn params(endpoint: &str, username: &str, password: &str) -> BrokerParams {
    BrokerParams {
        endpoint: endpoint.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}
