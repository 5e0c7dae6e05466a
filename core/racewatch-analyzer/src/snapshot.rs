//! Full-state snapshot for post-mortem analysis.

use racewatch_clock::VectorClock;
use racewatch_types::{LockId, ThreadId, VarId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An owned copy of every clock the analyzer holds.
///
/// Taken at termination (or any quiescent point) for post-mortem dumps;
/// see `racewatch-report` for a text rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSnapshot {
    /// Clock per observed thread.
    pub thread_clocks: HashMap<ThreadId, VectorClock>,
    /// Read clock per tracked variable.
    pub read_clocks: HashMap<VarId, VectorClock>,
    /// Write clock per tracked variable.
    pub write_clocks: HashMap<VarId, VectorClock>,
    /// Clock per tracked lock.
    pub lock_clocks: HashMap<LockId, VectorClock>,
}

impl AnalyzerSnapshot {
    /// Returns true if the analyzer had observed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thread_clocks.is_empty()
            && self.read_clocks.is_empty()
            && self.write_clocks.is_empty()
            && self.lock_clocks.is_empty()
    }
}
