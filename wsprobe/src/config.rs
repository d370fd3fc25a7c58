use std::time::Duration;

use anyhow::{bail, Context, Result};
use wsprobe_api::{limits::MAX_HEAD_BYTES, request::DEFAULT_ORIGIN};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PATH: &str = "/ocpp/CentralSystemService/LOCAL-CP-01";
pub const DEFAULT_PROTOCOL: &str = "ocpp1.6";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Target and limits for one probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub protocol: String,
    pub origin: String,
    /// Bounds the connect and, separately, the request/response exchange.
    pub timeout: Duration,
    pub max_head_bytes: usize,
    /// Fail the probe unless `Sec-WebSocket-Accept` matches the key we sent.
    pub strict_accept: bool,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_head_bytes: MAX_HEAD_BYTES,
            strict_accept: false,
        }
    }
}

impl HandshakeConfig {
    /// - WS_HOST (default localhost)
    /// - WS_PORT (default 3000)
    /// - WS_PATH (default /ocpp/CentralSystemService/LOCAL-CP-01)
    /// - WS_PROTOCOL (default ocpp1.6)
    /// - WS_ORIGIN (default http://localhost:5500)
    /// - WS_TIMEOUT_SECS (default 5)
    /// - WS_MAX_HEAD_BYTES (default 8192)
    /// - WS_STRICT_ACCEPT (bool, default false)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HandshakeConfig::from_env`] with an arbitrary variable source.
    /// Unset and blank values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut cfg = Self::default();

        if let Some(v) = get("WS_HOST") {
            cfg.host = v;
        }
        if let Some(v) = get("WS_PORT") {
            cfg.port = v
                .parse::<u16>()
                .with_context(|| format!("WS_PORT must be a TCP port number, got {v:?}"))?;
        }
        if let Some(v) = get("WS_PATH") {
            cfg.path = v;
        }
        if let Some(v) = get("WS_PROTOCOL") {
            cfg.protocol = v;
        }
        if let Some(v) = get("WS_ORIGIN") {
            cfg.origin = v;
        }
        if let Some(v) = get("WS_TIMEOUT_SECS") {
            let secs = v
                .parse::<u64>()
                .with_context(|| format!("WS_TIMEOUT_SECS must be whole seconds, got {v:?}"))?;
            if secs == 0 {
                bail!("WS_TIMEOUT_SECS must be greater than zero");
            }
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get("WS_MAX_HEAD_BYTES") {
            cfg.max_head_bytes = v
                .parse::<usize>()
                .with_context(|| format!("WS_MAX_HEAD_BYTES must be a byte count, got {v:?}"))?;
        }
        if let Some(v) = get("WS_STRICT_ACCEPT") {
            cfg.strict_accept = flag_true(&v);
        }

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn flag_true(v: &str) -> bool {
    matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
