use wsprobe_api::{
    accept::{derive_accept_key, AcceptCheck},
    response::parse_headers,
    verdict::{is_upgrade_ok, Verdict},
};

fn ok_for(resp: &str) -> bool {
    let r = parse_headers(resp);
    is_upgrade_ok(&r.status_line, &r.headers)
}

#[test]
fn switching_with_websocket_upgrade_passes() {
    assert!(ok_for("HTTP/1.1 101 Switching Protocols\r\nUpgrade: websocket\r\n\r\n"));
    assert!(ok_for("HTTP/1.1 101 Switching Protocols\r\nUpgrade: WebSocket\r\n\r\n"));
}

#[test]
fn non_101_fails() {
    assert!(!ok_for("HTTP/1.1 400 Bad Request\r\nUpgrade: websocket\r\n\r\n"));
    assert!(!ok_for("HTTP/1.0 101 Switching Protocols\r\nUpgrade: websocket\r\n\r\n"));
}

#[test]
fn wrong_or_missing_upgrade_fails() {
    assert!(!ok_for("HTTP/1.1 101 Switching Protocols\r\nUpgrade: h2c\r\n\r\n"));
    assert!(!ok_for("HTTP/1.1 101 Switching Protocols\r\nConnection: Upgrade\r\n\r\n"));
    assert!(!ok_for(""));
}

#[test]
fn connection_and_protocol_do_not_affect_outcome() {
    assert!(ok_for(
        "HTTP/1.1 101 Switching Protocols\r\nUpgrade: websocket\r\nConnection: keep-alive\r\nSec-WebSocket-Protocol: ocpp2.0\r\n\r\n"
    ));
}

#[test]
fn verdict_renders_result_line() {
    assert_eq!(Verdict::from_ok(true).to_string(), "RESULT: OK");
    assert_eq!(Verdict::from_ok(false).to_string(), "RESULT: FAIL");
}

#[test]
fn accept_check_classifies_server_value() {
    let key = "x3JJHMbDL1EzLkh9GBhXDw==";
    let good = derive_accept_key(key);
    assert_eq!(good, "HSmrc0sMlYUkAGmm5OPpG2HaGWk=");
    assert_eq!(AcceptCheck::evaluate(key, &good), AcceptCheck::Valid);
    assert_eq!(AcceptCheck::evaluate(key, "AAAA"), AcceptCheck::Mismatch);
    assert_eq!(AcceptCheck::evaluate(key, ""), AcceptCheck::Missing);
    assert_eq!(AcceptCheck::Missing.as_str(), "missing");
}
