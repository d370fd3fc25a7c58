use std::collections::HashMap;

use memchr::memmem;

/// Response header fields keyed by lower-cased name. A repeated name keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.inner
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Case-insensitive lookup; a missing header reads as `""`.
    pub fn get(&self, name: &str) -> &str {
        self.try_get(name).unwrap_or("")
    }

    pub fn try_get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub status_line: String,
    pub headers: HeaderMap,
}

impl ParsedResponse {
    /// Numeric code from the status line, if the second token is one.
    pub fn status_code(&self) -> Option<u16> {
        let mut sp = self.status_line.split_whitespace();
        let _proto = sp.next()?;
        sp.next().and_then(|c| c.parse::<u16>().ok())
    }
}

/// Splits a response head into its status line and header fields.
///
/// Header parsing stops at the first empty line. Lines without a colon are skipped.
pub fn parse_headers(resp: &str) -> ParsedResponse {
    let mut lines = resp.split("\r\n");
    let status_line = lines.next().unwrap_or("").to_string();
    let mut headers = HeaderMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name, value);
        }
    }
    ParsedResponse { status_line, headers }
}

/// Decodes raw response bytes, dropping any sequence that is not valid UTF-8.
pub fn decode_head(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Offset of the CRLFCRLF that ends a response head.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    memmem::find(buf, b"\r\n\r\n")
}
