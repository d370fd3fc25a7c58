use std::process::ExitCode;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wsprobe::{config::HandshakeConfig, probe};

const EXIT_FAIL: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAIL),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run() -> Result<bool> {
    let cfg = HandshakeConfig::from_env().context("invalid probe configuration")?;
    debug!(?cfg, "configuration loaded");
    probe::test_handshake(&cfg)
        .await
        .with_context(|| format!("handshake probe to {} aborted", cfg.addr()))
}
