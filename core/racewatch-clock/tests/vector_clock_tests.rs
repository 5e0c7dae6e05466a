use racewatch_clock::{CausalOrder, VectorClock};
use racewatch_types::ThreadId;

fn t(id: u32) -> ThreadId {
    ThreadId::new(id)
}

fn clock(entries: &[(u32, u64)]) -> VectorClock {
    entries.iter().map(|&(id, v)| (t(id), v)).collect()
}

#[test]
fn new_clock_is_empty() {
    let vc = VectorClock::new();
    assert!(vc.is_empty());
    assert_eq!(vc.len(), 0);
}

#[test]
fn get_unknown_thread_returns_zero() {
    let vc = VectorClock::new();
    assert_eq!(vc.get(t(9)), 0);
}

#[test]
fn set_then_get() {
    let mut vc = VectorClock::new();
    vc.set(t(0), 5);
    assert_eq!(vc.get(t(0)), 5);
    assert_eq!(vc.len(), 1);
}

#[test]
fn set_overwrites_even_downward() {
    let mut vc = VectorClock::new();
    vc.set(t(0), 5);
    vc.set(t(0), 2);
    assert_eq!(vc.get(t(0)), 2);
}

#[test]
fn increment_increases_time() {
    let mut vc = VectorClock::new();
    assert_eq!(vc.increment(t(1)), 1);
    assert_eq!(vc.increment(t(1)), 2);
    assert_eq!(vc.get(t(1)), 2);
}

// ── Merge ────────────────────────────────────────────────────────

#[test]
fn merge_takes_pointwise_maximum() {
    let mut a = clock(&[(0, 2), (1, 1)]);
    let b = clock(&[(0, 1), (1, 3), (2, 1)]);
    a.merge(&b);
    assert_eq!(a.get(t(0)), 2);
    assert_eq!(a.get(t(1)), 3);
    assert_eq!(a.get(t(2)), 1);
}

#[test]
fn merge_with_zero_clock_is_identity() {
    let mut a = clock(&[(0, 2)]);
    a.merge(&VectorClock::new());
    assert_eq!(a, clock(&[(0, 2)]));
}

#[test]
fn merged_leaves_original_unchanged() {
    let a = clock(&[(0, 1)]);
    let b = clock(&[(1, 1)]);
    let joined = a.merged(&b);
    assert_eq!(joined.get(t(0)), 1);
    assert_eq!(joined.get(t(1)), 1);
    assert_eq!(a.get(t(1)), 0);
}

// ── Happens-before ───────────────────────────────────────────────

#[test]
fn le_is_reflexive() {
    let a = clock(&[(0, 3), (1, 1)]);
    assert!(a.le(&a));
}

#[test]
fn zero_clock_le_everything() {
    let zero = VectorClock::new();
    assert!(zero.le(&clock(&[(0, 1)])));
    assert!(zero.le(&zero));
}

#[test]
fn le_fails_on_any_component() {
    let a = clock(&[(0, 1), (1, 2)]);
    let b = clock(&[(0, 5), (1, 1)]);
    assert!(!a.le(&b));
    assert!(!b.le(&a));
}

#[test]
fn le_treats_missing_entries_as_zero() {
    let a = clock(&[(3, 1)]);
    let b = clock(&[(0, 9)]);
    assert!(!a.le(&b));
    // explicit zero is still below anything
    let z = clock(&[(3, 0)]);
    assert!(z.le(&b));
}

// ── Compare ──────────────────────────────────────────────────────

#[test]
fn compare_equal() {
    let a = clock(&[(0, 1)]);
    let b = clock(&[(0, 1)]);
    assert_eq!(a.compare(&b), CausalOrder::Equal);
    assert_eq!(a, b);
}

#[test]
fn explicit_zero_equals_absent() {
    let a = clock(&[(0, 1), (1, 0)]);
    let b = clock(&[(0, 1)]);
    assert_eq!(a.compare(&b), CausalOrder::Equal);
    assert_eq!(a, b);
}

#[test]
fn compare_before_after() {
    let a = clock(&[(0, 1)]);
    let b = clock(&[(0, 2), (1, 1)]);
    assert_eq!(a.compare(&b), CausalOrder::Before);
    assert_eq!(b.compare(&a), CausalOrder::After);
}

#[test]
fn compare_concurrent() {
    let a = clock(&[(0, 1)]);
    let b = clock(&[(1, 1)]);
    assert_eq!(a.compare(&b), CausalOrder::Concurrent);
    assert!(a.is_concurrent(&b));
}

#[test]
fn dominates_is_ge() {
    let a = clock(&[(0, 2), (1, 1)]);
    let b = clock(&[(0, 2)]);
    assert!(a.dominates(&b));
    assert!(!b.dominates(&a));
    assert!(a.dominates(&a));
}

// ── Display ──────────────────────────────────────────────────────

#[test]
fn display_sorts_by_thread_id() {
    let vc = clock(&[(2, 3), (0, 1), (10, 2)]);
    assert_eq!(vc.to_string(), "<T0:1,T2:3,T10:2>");
}

#[test]
fn display_omits_zero_entries() {
    let vc = clock(&[(0, 1), (1, 0)]);
    assert_eq!(vc.to_string(), "<T0:1>");
}

#[test]
fn display_zero_clock() {
    assert_eq!(VectorClock::new().to_string(), "<>");
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serialization_roundtrip() {
    let vc = clock(&[(0, 2), (7, 4)]);
    let json = serde_json::to_string(&vc).unwrap();
    let parsed: VectorClock = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, vc);
}
