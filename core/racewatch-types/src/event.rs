//! The trace-event stream consumed by the analyzer.
//!
//! An event source (a tracing runtime, an instrumented binary, or a replay
//! file) emits one `TraceEvent` per observed operation. Acquire events are
//! emitted after the underlying lock call returns; release events before
//! the unlock proceeds, so the submission order seen by the dispatcher is
//! always a linear extension of the traced program's happens-before order.

use crate::{LockId, ThreadHandle, ThreadId, VarId};
use serde::{Deserialize, Serialize};

/// A single observed operation in a traced program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A thread read a variable.
    Read {
        /// The accessing thread.
        thread: ThreadId,
        /// The variable read.
        var: VarId,
    },

    /// A thread wrote a variable.
    Write {
        /// The accessing thread.
        thread: ThreadId,
        /// The variable written.
        var: VarId,
    },

    /// A thread acquired a lock.
    Acquire {
        /// The acquiring thread.
        thread: ThreadId,
        /// The lock acquired.
        lock: LockId,
    },

    /// A thread released a lock.
    Release {
        /// The releasing thread.
        thread: ThreadId,
        /// The lock released.
        lock: LockId,
    },

    /// A thread created a child thread.
    Fork {
        /// The forking thread.
        parent: ThreadId,
        /// Opaque handle the source will present again at join.
        child: ThreadHandle,
    },

    /// A thread joined a previously forked child.
    Join {
        /// The joining thread.
        parent: ThreadId,
        /// Handle of the child being joined.
        child: ThreadHandle,
    },
}

impl TraceEvent {
    /// Creates a read event.
    #[must_use]
    pub fn read(thread: ThreadId, var: impl Into<VarId>) -> Self {
        Self::Read {
            thread,
            var: var.into(),
        }
    }

    /// Creates a write event.
    #[must_use]
    pub fn write(thread: ThreadId, var: impl Into<VarId>) -> Self {
        Self::Write {
            thread,
            var: var.into(),
        }
    }

    /// Creates an acquire event.
    #[must_use]
    pub fn acquire(thread: ThreadId, lock: impl Into<LockId>) -> Self {
        Self::Acquire {
            thread,
            lock: lock.into(),
        }
    }

    /// Creates a release event.
    #[must_use]
    pub fn release(thread: ThreadId, lock: impl Into<LockId>) -> Self {
        Self::Release {
            thread,
            lock: lock.into(),
        }
    }

    /// Creates a fork event.
    #[must_use]
    pub fn fork(parent: ThreadId, child: ThreadHandle) -> Self {
        Self::Fork { parent, child }
    }

    /// Creates a join event.
    #[must_use]
    pub fn join(parent: ThreadId, child: ThreadHandle) -> Self {
        Self::Join { parent, child }
    }

    /// Returns the thread that performed this operation.
    #[must_use]
    pub fn thread(&self) -> ThreadId {
        match self {
            Self::Read { thread, .. }
            | Self::Write { thread, .. }
            | Self::Acquire { thread, .. }
            | Self::Release { thread, .. } => *thread,
            Self::Fork { parent, .. } | Self::Join { parent, .. } => *parent,
        }
    }
}
