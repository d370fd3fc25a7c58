//! `Sec-WebSocket-Accept` derivation and comparison (RFC 6455 section 4.2.2).

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha1::{Digest, Sha1};

const WS_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

pub fn derive_accept_key(request_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(request_key.as_bytes());
    hasher.update(WS_GUID.as_bytes());
    BASE64.encode(hasher.finalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptCheck {
    Valid,
    Mismatch,
    Missing,
}

impl AcceptCheck {
    /// Compares a server's accept header value (empty = absent) against the key we sent.
    pub fn evaluate(request_key: &str, accept: &str) -> Self {
        if accept.is_empty() {
            AcceptCheck::Missing
        } else if accept == derive_accept_key(request_key) {
            AcceptCheck::Valid
        } else {
            AcceptCheck::Mismatch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AcceptCheck::Valid => "valid",
            AcceptCheck::Mismatch => "mismatch",
            AcceptCheck::Missing => "missing",
        }
    }
}
