use racewatch_types::{AccessKind, LockId, ThreadHandle, ThreadId, VarId};
use std::str::FromStr;

// ── ThreadId ─────────────────────────────────────────────────────

#[test]
fn thread_id_roundtrips_raw_value() {
    let t = ThreadId::new(7);
    assert_eq!(t.as_u32(), 7);
    assert_eq!(ThreadId::from(7), t);
}

#[test]
fn thread_id_display_is_prefixed() {
    assert_eq!(ThreadId::new(0).to_string(), "T0");
    assert_eq!(ThreadId::new(12).to_string(), "T12");
}

#[test]
fn thread_id_orders_numerically() {
    assert!(ThreadId::new(2) < ThreadId::new(10));
}

#[test]
fn thread_id_serializes_transparently() {
    let json = serde_json::to_string(&ThreadId::new(3)).unwrap();
    assert_eq!(json, "3");
    let parsed: ThreadId = serde_json::from_str("3").unwrap();
    assert_eq!(parsed, ThreadId::new(3));
}

// ── ThreadHandle ─────────────────────────────────────────────────

#[test]
fn handles_are_unique() {
    assert_ne!(ThreadHandle::new(), ThreadHandle::new());
}

#[test]
fn handle_parses_from_display() {
    let h = ThreadHandle::new();
    let parsed = ThreadHandle::from_str(&h.to_string()).unwrap();
    assert_eq!(parsed, h);
}

#[test]
fn handle_rejects_garbage() {
    assert!(ThreadHandle::from_str("not-a-uuid").is_err());
}

#[test]
fn handle_preserves_uuid() {
    let h = ThreadHandle::new();
    assert_eq!(ThreadHandle::from_uuid(h.as_uuid()), h);
}

// ── VarId / LockId ───────────────────────────────────────────────

#[test]
fn var_id_from_name() {
    let x = VarId::new("counter");
    assert_eq!(x.as_str(), "counter");
    assert_eq!(x.to_string(), "counter");
}

#[test]
fn var_id_from_addr_formats_hex() {
    let x = VarId::from_addr(0x7fff_1234);
    assert_eq!(x.as_str(), "0x7fff1234");
}

#[test]
fn var_id_equality_is_by_value() {
    assert_eq!(VarId::from("x"), VarId::new("x".to_string()));
    assert_ne!(VarId::from("x"), VarId::from("y"));
}

#[test]
fn lock_id_from_addr_formats_hex() {
    let m = LockId::from_addr(0xdead);
    assert_eq!(m.as_str(), "0xdead");
}

#[test]
fn lock_id_orders_lexicographically() {
    assert!(LockId::from("a") < LockId::from("b"));
}

// ── AccessKind ───────────────────────────────────────────────────

#[test]
fn access_kind_display() {
    assert_eq!(AccessKind::Read.to_string(), "read");
    assert_eq!(AccessKind::Write.to_string(), "write");
}

#[test]
fn access_kind_serde_is_snake_case() {
    assert_eq!(serde_json::to_string(&AccessKind::Write).unwrap(), "\"write\"");
}
