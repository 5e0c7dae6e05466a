//! Race-violation records delivered to callbacks.
//!
//! Every clock in these records is an owned copy taken after the
//! offending access was folded into the analyzer's state, so a handler
//! (and anything it stores the record in) is decoupled from the
//! analyzer's subsequent updates.

use racewatch_clock::VectorClock;
use racewatch_types::{AccessKind, ThreadId, VarId};
use serde::{Deserialize, Serialize};

/// A read that races with an earlier write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadViolation {
    /// The reading thread.
    pub thread: ThreadId,
    /// The variable read.
    pub var: VarId,
    /// The reader's clock at the access.
    pub thread_clock: VectorClock,
    /// The variable's write clock, containing the unordered write.
    pub write_clock: VectorClock,
}

/// A write that races with an earlier read or write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteViolation {
    /// The writing thread.
    pub thread: ThreadId,
    /// The variable written.
    pub var: VarId,
    /// The writer's clock at the access.
    pub thread_clock: VectorClock,
    /// The variable's read clock.
    pub read_clock: VectorClock,
    /// The variable's write clock, already containing this write.
    pub write_clock: VectorClock,
}

/// Either kind of violation, for uniform collection and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A racing read.
    Read(ReadViolation),
    /// A racing write.
    Write(WriteViolation),
}

impl Violation {
    /// The kind of the racing access.
    #[must_use]
    pub fn kind(&self) -> AccessKind {
        match self {
            Self::Read(_) => AccessKind::Read,
            Self::Write(_) => AccessKind::Write,
        }
    }

    /// The accessing thread.
    #[must_use]
    pub fn thread(&self) -> ThreadId {
        match self {
            Self::Read(v) => v.thread,
            Self::Write(v) => v.thread,
        }
    }

    /// The variable involved.
    #[must_use]
    pub fn var(&self) -> &VarId {
        match self {
            Self::Read(v) => &v.var,
            Self::Write(v) => &v.var,
        }
    }

    /// The accessing thread's clock at the violation.
    #[must_use]
    pub fn thread_clock(&self) -> &VectorClock {
        match self {
            Self::Read(v) => &v.thread_clock,
            Self::Write(v) => &v.thread_clock,
        }
    }
}

impl From<ReadViolation> for Violation {
    fn from(v: ReadViolation) -> Self {
        Self::Read(v)
    }
}

impl From<WriteViolation> for Violation {
    fn from(v: WriteViolation) -> Self {
        Self::Write(v)
    }
}
