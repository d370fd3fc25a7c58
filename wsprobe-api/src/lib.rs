pub mod accept;
pub mod limits;
pub mod request;
pub mod response;
pub mod verdict;

pub use accept::{derive_accept_key, AcceptCheck};
pub use request::{build_request, UpgradeRequest};
pub use response::{parse_headers, HeaderMap, ParsedResponse};
pub use verdict::{is_upgrade_ok, Verdict};
