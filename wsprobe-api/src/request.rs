use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;

pub const DEFAULT_ORIGIN: &str = "http://localhost:5500";
pub const WEBSOCKET_VERSION: &str = "13";

/// Number of random bytes behind a `Sec-WebSocket-Key`.
pub const KEY_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    /// Base64 `Sec-WebSocket-Key` sent with this request.
    pub key: String,
    pub text: String,
}

impl UpgradeRequest {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Fresh base64-encoded 16 byte nonce from the thread-local CSPRNG.
pub fn generate_key() -> String {
    let mut raw = [0u8; KEY_LEN];
    rand::thread_rng().fill_bytes(&mut raw);
    BASE64.encode(raw)
}

/// Builds an HTTP/1.1 upgrade request with a new random key and the default origin.
///
/// Inputs are written verbatim; nothing is validated or escaped.
pub fn build_request(host: &str, path: &str, protocol: &str) -> UpgradeRequest {
    build_request_with_key(host, path, protocol, DEFAULT_ORIGIN, generate_key())
}

pub fn build_request_with_key(
    host: &str,
    path: &str,
    protocol: &str,
    origin: &str,
    key: String,
) -> UpgradeRequest {
    let text = format!(
        "GET {path} HTTP/1.1\r\n\
Host: {host}\r\n\
Upgrade: websocket\r\n\
Connection: Upgrade\r\n\
Sec-WebSocket-Key: {key}\r\n\
Sec-WebSocket-Version: {ver}\r\n\
Sec-WebSocket-Protocol: {protocol}\r\n\
Origin: {origin}\r\n\r\n",
        ver = WEBSOCKET_VERSION,
    );
    UpgradeRequest { key, text }
}
