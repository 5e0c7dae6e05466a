//! Dynamic data-race detection via Djit+ vector clocks.
//!
//! The analyzer consumes a stream of thread events (reads, writes, lock
//! acquires and releases, forks and joins) and reports every pair of
//! accesses not ordered by the happens-before relation the stream's
//! synchronization induces.
//!
//! # Components
//!
//! - **[`Analyzer`]**: owns every vector clock (one per thread, a read and
//!   a write clock per variable, one per lock) and applies the Djit+
//!   update rules and race predicates, one event at a time.
//! - **[`EventDispatcher`]**: wraps the analyzer in its single exclusive
//!   lock and serializes concurrent event submission from the traced
//!   program's threads.
//!
//! # Example
//!
//! ```
//! use racewatch_analyzer::Analyzer;
//! use racewatch_types::ThreadId;
//!
//! let mut analyzer = Analyzer::new();
//! let t0 = ThreadId::new(0);
//! let t1 = ThreadId::new(1);
//!
//! let races = std::sync::Arc::new(std::sync::Mutex::new(0));
//! let seen = races.clone();
//! analyzer.set_write_violation_handler(move |_| *seen.lock().unwrap() += 1);
//!
//! analyzer.write(t0, &"x".into());
//! analyzer.write(t1, &"x".into()); // unordered with t0's write
//! assert_eq!(*races.lock().unwrap(), 1);
//! ```
//!
//! Detection is only as complete as the synchronization the event source
//! reports: lock-free or ad-hoc synchronization the analyzer has not been
//! told about will surface as false positives.

mod analyzer;
mod config;
mod dispatcher;
mod snapshot;
mod violation;

pub use analyzer::{Analyzer, ReadViolationHandler, WriteViolationHandler};
pub use config::{AnalyzerConfig, CreationPolicy};
pub use dispatcher::EventDispatcher;
pub use snapshot::AnalyzerSnapshot;
pub use violation::{ReadViolation, Violation, WriteViolation};
