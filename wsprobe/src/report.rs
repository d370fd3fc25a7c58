use wsprobe_api::verdict::Verdict;

use crate::probe::ProbeResult;

/// Console lines for a finished probe, newline terminated.
pub fn render(r: &ProbeResult) -> String {
    format!(
        "STATUS: {}\nPROTO: {}\nCONN: {}\nUPG: {}\nACCEPT: {}\n{}\n",
        r.status_line,
        r.protocol,
        r.connection,
        r.upgrade,
        r.accept.as_str(),
        Verdict::from_ok(r.ok),
    )
}
