//! The Djit+ vector-clock analyzer.
//!
//! One clock per thread (`C`), a read and a write clock per variable
//! (`R`, `W`), one clock per lock (`L`). Each event updates the clocks in
//! amortized O(T) for T distinct threads:
//!
//! - `read(t, x)`: race iff `W[x] ⋢ C[t]`; then `R[x][t] = C[t][t]`
//! - `write(t, x)`: race iff `R[x] ⋢ C[t]` or `W[x] ⋢ C[t]`; then
//!   `W[x][t] = C[t][t]`
//! - `acquire(t, m)`: `C[t] = C[t] ⊔ L[m]`
//! - `release(t, m)`: `C[t][t] += 1`, then `L[m] = C[t]`
//! - `fork(t, u)`: `C[u] = C[t]` with `C[u][u] = 1`, then `C[t][t] += 1`
//! - `join(t, u)`: `C[t] = C[t] ⊔ C[u]`, then `C[u][u] += 1`
//!
//! The race predicate is evaluated against the clocks as they stood
//! before the access is folded in, so a thread never races with its own
//! earlier footprint.

use crate::config::{AnalyzerConfig, CreationPolicy};
use crate::snapshot::AnalyzerSnapshot;
use crate::violation::{ReadViolation, WriteViolation};
use racewatch_clock::VectorClock;
use racewatch_types::{LockId, ThreadHandle, ThreadId, VarId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Callback invoked for every racing read.
pub type ReadViolationHandler = Box<dyn FnMut(&ReadViolation) + Send>;

/// Callback invoked for every racing write.
pub type WriteViolationHandler = Box<dyn FnMut(&WriteViolation) + Send>;

/// The vector-clock race analyzer.
///
/// Owns every clock; callers hold only thread ids, variable ids, lock
/// ids, and thread handles. Event operations are total: problems with an
/// event (an unwatched variable, an unknown join handle) drop the event
/// with a diagnostic and never propagate an error to the event source.
///
/// The analyzer itself is not synchronized. Wrap it in an
/// [`EventDispatcher`](crate::EventDispatcher) when events arrive from
/// more than one thread.
pub struct Analyzer {
    config: AnalyzerConfig,
    /// `C[t]` per observed thread.
    thread_clocks: HashMap<ThreadId, VectorClock>,
    /// `R[x]` per tracked variable.
    read_clocks: HashMap<VarId, VectorClock>,
    /// `W[x]` per tracked variable.
    write_clocks: HashMap<VarId, VectorClock>,
    /// `L[m]` per tracked lock.
    lock_clocks: HashMap<LockId, VectorClock>,
    /// Fork-handle bindings for join lookup.
    handles: HashMap<ThreadHandle, ThreadId>,
    /// Next thread id to hand out at fork. Never decreases.
    next_thread_id: u32,
    on_read_violation: Option<ReadViolationHandler>,
    on_write_violation: Option<WriteViolationHandler>,
}

impl Analyzer {
    /// Creates an analyzer with the default (lazy-creation) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with an explicit configuration.
    #[must_use]
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            config,
            thread_clocks: HashMap::new(),
            read_clocks: HashMap::new(),
            write_clocks: HashMap::new(),
            lock_clocks: HashMap::new(),
            handles: HashMap::new(),
            next_thread_id: 0,
            on_read_violation: None,
            on_write_violation: None,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    // ── Registration ─────────────────────────────────────────────

    /// Registers a variable, installing zero read and write clocks.
    /// Idempotent; an already-registered variable keeps its clocks.
    pub fn register_var(&mut self, var: impl Into<VarId>) {
        let var = var.into();
        self.write_clocks.entry(var.clone()).or_default();
        self.read_clocks.entry(var).or_default();
    }

    /// Registers a lock, installing a zero lock clock. Idempotent.
    pub fn register_lock(&mut self, lock: impl Into<LockId>) {
        self.lock_clocks.entry(lock.into()).or_default();
    }

    /// Installs the racing-read callback, replacing any previous one.
    ///
    /// Handlers run on the thread that delivered the offending event,
    /// while the dispatcher's analyzer lock is held; they must not call
    /// back into the analyzer.
    pub fn set_read_violation_handler(
        &mut self,
        handler: impl FnMut(&ReadViolation) + Send + 'static,
    ) {
        self.on_read_violation = Some(Box::new(handler));
    }

    /// Installs the racing-write callback, replacing any previous one.
    pub fn set_write_violation_handler(
        &mut self,
        handler: impl FnMut(&WriteViolation) + Send + 'static,
    ) {
        self.on_write_violation = Some(Box::new(handler));
    }

    // ── Event operations ─────────────────────────────────────────

    /// A thread read a variable.
    pub fn read(&mut self, thread: ThreadId, var: &VarId) {
        if !self.track_var(var) {
            debug!("read of unwatched variable {} by {} dropped", var, thread);
            return;
        }
        self.ensure_thread(thread);

        let thread_clock = &self.thread_clocks[&thread];
        let no_race = self.write_clocks[var].le(thread_clock);
        let own_time = thread_clock.get(thread);

        if let Some(read_clock) = self.read_clocks.get_mut(var) {
            read_clock.set(thread, own_time);
        }

        if !no_race {
            debug!("read race on {} by {}", var, thread);
            if let Some(handler) = self.on_read_violation.as_mut() {
                let violation = ReadViolation {
                    thread,
                    var: var.clone(),
                    thread_clock: self.thread_clocks[&thread].clone(),
                    write_clock: self.write_clocks[var].clone(),
                };
                handler(&violation);
            }
        }
    }

    /// A thread wrote a variable.
    pub fn write(&mut self, thread: ThreadId, var: &VarId) {
        if !self.track_var(var) {
            debug!("write of unwatched variable {} by {} dropped", var, thread);
            return;
        }
        self.ensure_thread(thread);

        let thread_clock = &self.thread_clocks[&thread];
        let no_race =
            self.read_clocks[var].le(thread_clock) && self.write_clocks[var].le(thread_clock);
        let own_time = thread_clock.get(thread);

        if let Some(write_clock) = self.write_clocks.get_mut(var) {
            write_clock.set(thread, own_time);
        }

        if !no_race {
            debug!("write race on {} by {}", var, thread);
            if let Some(handler) = self.on_write_violation.as_mut() {
                let violation = WriteViolation {
                    thread,
                    var: var.clone(),
                    thread_clock: self.thread_clocks[&thread].clone(),
                    read_clock: self.read_clocks[var].clone(),
                    write_clock: self.write_clocks[var].clone(),
                };
                handler(&violation);
            }
        }
    }

    /// A thread acquired a lock: the thread's clock joins the lock's.
    /// The lock clock itself is unchanged.
    pub fn acquire(&mut self, thread: ThreadId, lock: &LockId) {
        if !self.track_lock(lock) {
            debug!("acquire of unwatched lock {} by {} dropped", lock, thread);
            return;
        }
        self.ensure_thread(thread);

        let lock_clock = &self.lock_clocks[lock];
        if let Some(thread_clock) = self.thread_clocks.get_mut(&thread) {
            thread_clock.merge(lock_clock);
        }
    }

    /// A thread released a lock: the thread's own time is bumped, then its
    /// clock is published into the lock.
    ///
    /// The bump comes first so a later acquire observes a strictly greater
    /// component for this thread than any pre-release access carried.
    /// A release without a prior acquire is permitted and behaves the same.
    pub fn release(&mut self, thread: ThreadId, lock: &LockId) {
        if !self.track_lock(lock) {
            debug!("release of unwatched lock {} by {} dropped", lock, thread);
            return;
        }
        self.ensure_thread(thread);

        let Some(thread_clock) = self.thread_clocks.get_mut(&thread) else {
            return;
        };
        thread_clock.increment(thread);
        let published = thread_clock.clone();
        self.lock_clocks.insert(lock.clone(), published);
    }

    /// A thread forked a child. Allocates a fresh id for the child, seeds
    /// the child's clock with the parent's happens-before prefix plus its
    /// own component at 1, bumps the parent, and binds `child` to the new
    /// id for a later join. Returns the allocated id.
    pub fn fork(&mut self, parent: ThreadId, child: ThreadHandle) -> ThreadId {
        self.ensure_thread(parent);

        let child_id = ThreadId::new(self.next_thread_id);
        self.next_thread_id += 1;

        let mut child_clock = self.thread_clocks[&parent].clone();
        child_clock.set(child_id, 1);
        self.thread_clocks.insert(child_id, child_clock);

        if let Some(parent_clock) = self.thread_clocks.get_mut(&parent) {
            parent_clock.increment(parent);
        }

        if let Some(previous) = self.handles.insert(child, child_id) {
            warn!(
                "fork handle {} rebound from {} to {}; event source may be corrupt",
                child, previous, child_id
            );
        }

        debug!("fork: {} created {}", parent, child_id);
        child_id
    }

    /// A thread joined a previously forked child: the parent's clock joins
    /// the child's, and the terminated child's own time is bumped to keep
    /// its state monotone.
    ///
    /// A join naming a handle no fork ever bound indicates event-source
    /// corruption; the event is dropped with a diagnostic.
    pub fn join(&mut self, parent: ThreadId, child: ThreadHandle) {
        let Some(&child_id) = self.handles.get(&child) else {
            warn!("join by {} on unknown handle {} dropped", parent, child);
            return;
        };
        debug_assert_ne!(child_id, parent, "thread joining itself");
        if child_id == parent {
            warn!("self-join by {} dropped", parent);
            return;
        }
        self.ensure_thread(parent);

        let child_clock = self.thread_clocks[&child_id].clone();
        if let Some(parent_clock) = self.thread_clocks.get_mut(&parent) {
            parent_clock.merge(&child_clock);
        }
        if let Some(clock) = self.thread_clocks.get_mut(&child_id) {
            clock.increment(child_id);
        }

        debug!("join: {} joined {}", parent, child_id);
    }

    // ── Queries ──────────────────────────────────────────────────

    /// The clock of an observed thread.
    #[must_use]
    pub fn thread_clock(&self, thread: ThreadId) -> Option<&VectorClock> {
        self.thread_clocks.get(&thread)
    }

    /// The read clock of a tracked variable.
    #[must_use]
    pub fn read_clock(&self, var: &VarId) -> Option<&VectorClock> {
        self.read_clocks.get(var)
    }

    /// The write clock of a tracked variable.
    #[must_use]
    pub fn write_clock(&self, var: &VarId) -> Option<&VectorClock> {
        self.write_clocks.get(var)
    }

    /// The clock of a tracked lock.
    #[must_use]
    pub fn lock_clock(&self, lock: &LockId) -> Option<&VectorClock> {
        self.lock_clocks.get(lock)
    }

    /// The thread id a fork bound to this handle, if any.
    #[must_use]
    pub fn thread_for_handle(&self, handle: &ThreadHandle) -> Option<ThreadId> {
        self.handles.get(handle).copied()
    }

    /// Ids of every observed thread.
    pub fn threads(&self) -> impl Iterator<Item = ThreadId> + '_ {
        self.thread_clocks.keys().copied()
    }

    /// Ids of every tracked variable.
    pub fn vars(&self) -> impl Iterator<Item = &VarId> {
        self.read_clocks.keys()
    }

    /// Ids of every tracked lock.
    pub fn locks(&self) -> impl Iterator<Item = &LockId> {
        self.lock_clocks.keys()
    }

    /// An owned copy of the complete clock state.
    #[must_use]
    pub fn snapshot(&self) -> AnalyzerSnapshot {
        AnalyzerSnapshot {
            thread_clocks: self.thread_clocks.clone(),
            read_clocks: self.read_clocks.clone(),
            write_clocks: self.write_clocks.clone(),
            lock_clocks: self.lock_clocks.clone(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────

    /// Creates the clock for a thread the first time it is named, with the
    /// thread's own component at 1, and keeps the fork counter ahead of
    /// every id the stream has used directly.
    fn ensure_thread(&mut self, thread: ThreadId) {
        self.thread_clocks.entry(thread).or_insert_with(|| {
            let mut clock = VectorClock::new();
            clock.set(thread, 1);
            clock
        });
        if thread.as_u32() >= self.next_thread_id {
            self.next_thread_id = thread.as_u32() + 1;
        }
    }

    /// Returns whether events on this variable are tracked, creating its
    /// clocks first under the lazy policy.
    fn track_var(&mut self, var: &VarId) -> bool {
        match self.config.policy {
            CreationPolicy::Lazy => {
                if !self.read_clocks.contains_key(var) {
                    self.read_clocks.insert(var.clone(), VectorClock::new());
                    self.write_clocks.insert(var.clone(), VectorClock::new());
                }
                true
            }
            CreationPolicy::WatchSet => self.read_clocks.contains_key(var),
        }
    }

    /// Returns whether events on this lock are tracked, creating its clock
    /// first under the lazy policy.
    fn track_lock(&mut self, lock: &LockId) -> bool {
        match self.config.policy {
            CreationPolicy::Lazy => {
                self.lock_clocks.entry(lock.clone()).or_default();
                true
            }
            CreationPolicy::WatchSet => self.lock_clocks.contains_key(lock),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
