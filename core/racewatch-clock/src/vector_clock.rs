//! Vector clock mapping thread ids to logical times.
//!
//! Semantically a total function: threads the clock has never mentioned
//! have logical time 0. The representation is sparse (a map holding only
//! non-zero entries plus whatever a caller explicitly wrote) because the
//! analyzer places no bound on how many threads a trace may name.

use racewatch_types::ThreadId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Causal relationship between two vector clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CausalOrder {
    /// First clock happened before second.
    Before,
    /// First clock happened after second.
    After,
    /// Clocks are concurrent (neither happened before the other).
    Concurrent,
    /// Clocks are pointwise identical.
    Equal,
}

/// A vector clock: logical time per thread.
///
/// Summarizes the happens-before prefix of some event. Comparing two
/// clocks with [`VectorClock::le`] decides whether one event's knowledge
/// is contained in another's, which is exactly the Djit+ race predicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorClock {
    /// Map from thread id to logical time at that thread.
    clocks: HashMap<ThreadId, u64>,
}

impl VectorClock {
    /// Creates the zero clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clocks: HashMap::new(),
        }
    }

    /// Returns the logical time for a thread (0 if never mentioned).
    #[must_use]
    pub fn get(&self, thread: ThreadId) -> u64 {
        self.clocks.get(&thread).copied().unwrap_or(0)
    }

    /// Sets the logical time for a thread.
    pub fn set(&mut self, thread: ThreadId, time: u64) {
        self.clocks.insert(thread, time);
    }

    /// Increments the time for a thread and returns the new value.
    pub fn increment(&mut self, thread: ThreadId) -> u64 {
        let entry = self.clocks.entry(thread).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Returns the threads with explicit entries and their times.
    pub fn entries(&self) -> impl Iterator<Item = (ThreadId, u64)> + '_ {
        self.clocks.iter().map(|(&t, &v)| (t, v))
    }

    /// Returns the number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clocks.len()
    }

    /// Returns true if the clock has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clocks.is_empty()
    }

    /// Joins another clock into this one, taking the pointwise maximum.
    pub fn merge(&mut self, other: &Self) {
        for (&thread, &time) in &other.clocks {
            let entry = self.clocks.entry(thread).or_insert(0);
            if time > *entry {
                *entry = time;
            }
        }
    }

    /// Returns the join of this clock and another.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Happens-before-or-equal: true iff this clock is pointwise `<=` the
    /// other. Threads absent from either side count as 0.
    #[must_use]
    pub fn le(&self, other: &Self) -> bool {
        self.clocks
            .iter()
            .all(|(&thread, &time)| time <= other.get(thread))
    }

    /// Compares this clock with another to determine causal ordering.
    #[must_use]
    pub fn compare(&self, other: &Self) -> CausalOrder {
        match (self.le(other), other.le(self)) {
            (true, true) => CausalOrder::Equal,
            (true, false) => CausalOrder::Before,
            (false, true) => CausalOrder::After,
            (false, false) => CausalOrder::Concurrent,
        }
    }

    /// Returns true if this clock dominates the other (`>=` for all threads).
    #[must_use]
    pub fn dominates(&self, other: &Self) -> bool {
        other.le(self)
    }

    /// Returns true if neither clock dominates the other.
    #[must_use]
    pub fn is_concurrent(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::Concurrent
    }
}

impl PartialEq for VectorClock {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == CausalOrder::Equal
    }
}

impl Eq for VectorClock {}

impl fmt::Display for VectorClock {
    /// Renders as `<T0:1,T2:3>` with entries sorted by thread id.
    /// Zero entries are omitted; the zero clock renders as `<>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self
            .clocks
            .iter()
            .filter(|(_, &time)| time > 0)
            .map(|(&thread, &time)| (thread, time))
            .collect();
        entries.sort_by_key(|&(thread, _)| thread);

        f.write_str("<")?;
        for (i, (thread, time)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{thread}:{time}")?;
        }
        f.write_str(">")
    }
}

impl FromIterator<(ThreadId, u64)> for VectorClock {
    fn from_iter<I: IntoIterator<Item = (ThreadId, u64)>>(iter: I) -> Self {
        Self {
            clocks: iter.into_iter().collect(),
        }
    }
}
