use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use mq_publish::{handle_with, BrokerParams, Request};
use stomp_client::TlsDialer;

// MQ_ENDPOINT_IP=stomp+ssl://b-1234.mq.us-east-1.amazonaws.com:61614 \
// BROKER_USERNAME=admin BROKER_PASSWORD=secret cargo run

#[derive(Parser, Debug)]
#[command(name = "mq-publish")]
struct Cli {
    #[command(flatten)]
    params: BrokerParams,

    /// JSON request envelope to pass to the handler.
    #[arg(long)]
    request: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let request: Request = match &cli.request {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
            serde_json::from_str(&raw).context("parsing request envelope JSON")?
        }
        None => Request::default(),
    };

    let dialer = TlsDialer::new().context("building TLS client config")?;
    let (response, error) = handle_with(&dialer, &cli.params, &request).await;

    println!("{}", serde_json::to_string(&response)?);

    if response.is_success() {
        return Ok(());
    }
    Err(match error {
        Some(e) => e.into(),
        None => anyhow!("invocation failed with status {}", response.status_code),
    })
}
