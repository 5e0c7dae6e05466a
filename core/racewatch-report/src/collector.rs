//! Violation collection.

use parking_lot::Mutex;
use racewatch_analyzer::{Analyzer, Violation};
use std::sync::Arc;

/// Accumulates every violation an analyzer reports, in delivery order.
///
/// Cheap to clone; all clones share the same buffer, so one collector can
/// be installed and another held for inspection. Collection happens inside
/// the violation callbacks, under the dispatcher's analyzer lock; the
/// collector only copies the record and returns.
#[derive(Clone, Default)]
pub struct RaceCollector {
    races: Arc<Mutex<Vec<Violation>>>,
}

impl RaceCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs this collector as both violation handlers on an analyzer,
    /// replacing any previous handlers.
    pub fn install(&self, analyzer: &mut Analyzer) {
        let sink = self.races.clone();
        analyzer.set_read_violation_handler(move |v| {
            sink.lock().push(Violation::Read(v.clone()));
        });
        let sink = self.races.clone();
        analyzer.set_write_violation_handler(move |v| {
            sink.lock().push(Violation::Write(v.clone()));
        });
    }

    /// Returns a copy of everything collected so far.
    #[must_use]
    pub fn races(&self) -> Vec<Violation> {
        self.races.lock().clone()
    }

    /// Drains the collected violations.
    #[must_use]
    pub fn take(&self) -> Vec<Violation> {
        std::mem::take(&mut *self.races.lock())
    }

    /// Number of violations collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.races.lock().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.races.lock().is_empty()
    }
}
