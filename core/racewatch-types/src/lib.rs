//! Core type definitions for RaceWatch.
//!
//! This crate defines the fundamental, source-agnostic types shared by the
//! analyzer and every event source:
//! - Thread, variable, and lock identifiers
//! - Opaque thread handles for fork/join matching
//! - The trace-event stream consumed by the analyzer
//!
//! Everything specific to how events are obtained (binary instrumentation,
//! trace replay, a language runtime) belongs in the event source, not here.

mod event;
mod ids;

pub use event::TraceEvent;
pub use ids::{AccessKind, LockId, ThreadHandle, ThreadId, VarId};
