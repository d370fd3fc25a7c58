use crate::response::HeaderMap;

const SWITCHING_PREFIX: &str = "HTTP/1.1 101";

/// Pass/fail predicate for an upgrade reply.
///
/// Only the status prefix and the `Upgrade` header count; `Connection` and the
/// echoed subprotocol are informational.
pub fn is_upgrade_ok(status_line: &str, headers: &HeaderMap) -> bool {
    status_line.starts_with(SWITCHING_PREFIX)
        && headers.get("upgrade").to_ascii_lowercase() == "websocket"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Fail,
}

impl Verdict {
    pub fn from_ok(ok: bool) -> Self {
        if ok { Verdict::Ok } else { Verdict::Fail }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RESULT: {}", self.as_str())
    }
}
