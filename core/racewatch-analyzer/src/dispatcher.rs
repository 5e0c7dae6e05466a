//! Event dispatcher — serializes concurrent event delivery.
//!
//! The traced program's threads submit events concurrently; the analyzer
//! must observe them one at a time. A single exclusive lock around the
//! analyzer provides that total order, and because the traced program's
//! own synchronization already orders the submissions it orders (a
//! release is submitted before the unlock returns, an acquire after the
//! lock call returns), the lock-induced order is always a linear
//! extension of the traced program's happens-before.

use crate::analyzer::Analyzer;
use crate::snapshot::AnalyzerSnapshot;
use parking_lot::Mutex;
use racewatch_types::{LockId, ThreadHandle, ThreadId, TraceEvent, VarId};
use std::sync::Arc;

/// Serializes event submission to a shared [`Analyzer`].
///
/// Cheap to clone; all clones share the one analyzer. Every `submit_*`
/// operation holds the analyzer lock for the duration of the update and
/// any violation callback, then returns. Submissions never fail and never
/// block on anything but the lock.
#[derive(Clone)]
pub struct EventDispatcher {
    analyzer: Arc<Mutex<Analyzer>>,
}

impl EventDispatcher {
    /// Wraps an analyzer for concurrent submission.
    #[must_use]
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(Mutex::new(analyzer)),
        }
    }

    /// Submits a read by `thread` of `var`.
    ///
    /// Must be invoked on the logical thread performing the access, after
    /// the access itself.
    pub fn submit_read(&self, thread: ThreadId, var: &VarId) {
        self.analyzer.lock().read(thread, var);
    }

    /// Submits a write by `thread` of `var`.
    pub fn submit_write(&self, thread: ThreadId, var: &VarId) {
        self.analyzer.lock().write(thread, var);
    }

    /// Submits a lock acquisition (after the underlying lock call returned).
    pub fn submit_acquire(&self, thread: ThreadId, lock: &LockId) {
        self.analyzer.lock().acquire(thread, lock);
    }

    /// Submits a lock release (before the underlying unlock proceeds).
    pub fn submit_release(&self, thread: ThreadId, lock: &LockId) {
        self.analyzer.lock().release(thread, lock);
    }

    /// Submits a fork; returns the thread id allocated for the child.
    pub fn submit_fork(&self, parent: ThreadId, child: ThreadHandle) -> ThreadId {
        self.analyzer.lock().fork(parent, child)
    }

    /// Submits a join of a previously forked child.
    pub fn submit_join(&self, parent: ThreadId, child: ThreadHandle) {
        self.analyzer.lock().join(parent, child);
    }

    /// Routes a trace event to the matching analyzer operation.
    pub fn submit(&self, event: &TraceEvent) {
        match event {
            TraceEvent::Read { thread, var } => self.submit_read(*thread, var),
            TraceEvent::Write { thread, var } => self.submit_write(*thread, var),
            TraceEvent::Acquire { thread, lock } => self.submit_acquire(*thread, lock),
            TraceEvent::Release { thread, lock } => self.submit_release(*thread, lock),
            TraceEvent::Fork { parent, child } => {
                self.submit_fork(*parent, *child);
            }
            TraceEvent::Join { parent, child } => self.submit_join(*parent, *child),
        }
    }

    /// Runs a closure against the analyzer under the lock, serialized with
    /// every submission. Intended for registration, callback installation,
    /// and queries; the closure must not submit events through this
    /// dispatcher.
    pub fn with_analyzer<R>(&self, f: impl FnOnce(&mut Analyzer) -> R) -> R {
        let mut analyzer = self.analyzer.lock();
        f(&mut analyzer)
    }

    /// Takes a full state snapshot under the lock.
    #[must_use]
    pub fn snapshot(&self) -> AnalyzerSnapshot {
        self.analyzer.lock().snapshot()
    }
}

impl From<Analyzer> for EventDispatcher {
    fn from(analyzer: Analyzer) -> Self {
        Self::new(analyzer)
    }
}
