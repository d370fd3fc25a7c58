//! One WebSocket upgrade exchange against a live server.
//!
//! The probe connects, writes the upgrade request, collects the response
//! head and closes the socket before judging the reply. Transport failures
//! come back as [`ProbeError`]; anything the server says is folded into
//! [`ProbeResult::ok`].

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use wsprobe_api::{
    accept::AcceptCheck,
    limits::{enforce_max_head_size, READ_CHUNK_BYTES},
    request::{build_request_with_key, generate_key, UpgradeRequest},
    response::{decode_head, find_head_end, parse_headers},
    verdict::is_upgrade_ok,
};

use crate::{config::HandshakeConfig, report};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connect to {addr} timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },
    #[error("no complete response within {timeout:?}")]
    ResponseTimeout { timeout: Duration },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw bytes of a response head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub bytes: Vec<u8>,
    /// CRLFCRLF was seen. False after EOF or an exhausted byte budget.
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub ok: bool,
    pub status_line: String,
    pub upgrade: String,
    pub connection: String,
    pub protocol: String,
    pub accept: AcceptCheck,
}

impl ProbeResult {
    /// Judges a response head against the key that was sent with the request.
    pub fn evaluate(head: &[u8], request_key: &str, strict_accept: bool) -> Self {
        let text = decode_head(head);
        let parsed = parse_headers(&text);
        let headers = &parsed.headers;
        let accept = AcceptCheck::evaluate(request_key, headers.get("sec-websocket-accept"));
        debug!(code = ?parsed.status_code(), headers = headers.len(), "response head parsed");

        let mut ok = is_upgrade_ok(&parsed.status_line, headers);
        if strict_accept {
            ok = ok && accept == AcceptCheck::Valid;
        }

        ProbeResult {
            ok,
            upgrade: headers.get("upgrade").to_string(),
            connection: headers.get("connection").to_string(),
            protocol: headers.get("sec-websocket-protocol").to_string(),
            status_line: parsed.status_line,
            accept,
        }
    }
}

/// Reads until the end of the response head, EOF, or more than `max_bytes`.
pub async fn read_response_head<S>(stream: &mut S, max_bytes: usize) -> std::io::Result<ResponseHead>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(READ_CHUNK_BYTES);
    let mut tmp = [0u8; READ_CHUNK_BYTES];
    let mut search_from: usize = 0;
    loop {
        let n = stream.read(&mut tmp).await?;
        if n == 0 {
            debug!(bytes = buf.len(), "peer closed before end of response head");
            return Ok(ResponseHead { bytes: buf, complete: false });
        }
        buf.extend_from_slice(&tmp[..n]);
        // overlap the previous tail so a split terminator is still found
        let start = search_from.saturating_sub(3);
        if find_head_end(&buf[start..]).is_some() {
            return Ok(ResponseHead { bytes: buf, complete: true });
        }
        if let Err(e) = enforce_max_head_size(buf.len(), max_bytes) {
            warn!("{e}; judging what was read");
            return Ok(ResponseHead { bytes: buf, complete: false });
        }
        search_from = buf.len();
    }
}

/// Writes `request` and collects the reply head, all within `cfg.timeout`.
pub async fn exchange<S>(
    stream: &mut S,
    request: &UpgradeRequest,
    cfg: &HandshakeConfig,
) -> Result<ResponseHead, ProbeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let io = async {
        stream.write_all(request.as_bytes()).await?;
        stream.flush().await?;
        read_response_head(stream, cfg.max_head_bytes).await
    };
    let head = timeout(cfg.timeout, io)
        .await
        .map_err(|_| ProbeError::ResponseTimeout { timeout: cfg.timeout })??;
    debug!(bytes = head.bytes.len(), complete = head.complete, "response head read");
    Ok(head)
}

/// Runs one probe over TCP. The socket is closed before this returns, whatever the outcome.
pub async fn probe(cfg: &HandshakeConfig) -> Result<ProbeResult, ProbeError> {
    probe_with(cfg, |host, port| async move { TcpStream::connect((host.as_str(), port)).await }).await
}

/// [`probe`] with a caller-supplied connector; `connect` is bounded by `cfg.timeout`.
pub async fn probe_with<S, C, Fut>(cfg: &HandshakeConfig, connect: C) -> Result<ProbeResult, ProbeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
    C: FnOnce(String, u16) -> Fut,
    Fut: Future<Output = std::io::Result<S>>,
{
    let addr = cfg.addr();
    debug!(%addr, path = %cfg.path, protocol = %cfg.protocol, "connecting");
    let mut stream = match timeout(cfg.timeout, connect(cfg.host.clone(), cfg.port)).await {
        Ok(Ok(s)) => s,
        Ok(Err(source)) => return Err(ProbeError::Connect { addr, source }),
        Err(_) => return Err(ProbeError::ConnectTimeout { addr, timeout: cfg.timeout }),
    };

    let request = build_request_with_key(&cfg.host, &cfg.path, &cfg.protocol, &cfg.origin, generate_key());
    let head = exchange(&mut stream, &request, cfg).await;
    if let Err(e) = stream.shutdown().await {
        debug!(%addr, "shutdown after exchange failed: {e}");
    }
    drop(stream);
    let head = head?;

    let result = ProbeResult::evaluate(&head.bytes, &request.key, cfg.strict_accept);
    if result.accept != AcceptCheck::Valid {
        warn!(accept = result.accept.as_str(), "Sec-WebSocket-Accept does not prove the handshake");
    }
    info!(%addr, ok = result.ok, status = %result.status_line, "probe finished");
    Ok(result)
}

/// Probes, prints the report to stdout and returns the outcome.
pub async fn test_handshake(cfg: &HandshakeConfig) -> Result<bool, ProbeError> {
    let result = probe(cfg).await?;
    let mut out = std::io::stdout().lock();
    out.write_all(report::render(&result).as_bytes())?;
    out.flush()?;
    Ok(result.ok)
}
