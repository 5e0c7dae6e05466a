//! Trace recording and replay for RaceWatch.
//!
//! The analyzer accepts events from any source; this crate provides the
//! simplest one, a trace file with one JSON event per line:
//!
//! ```text
//! {"event":"acquire","thread":0,"lock":"m"}
//! {"event":"write","thread":0,"var":"x"}
//! {"event":"release","thread":0,"lock":"m"}
//! ```
//!
//! [`TraceWriter`] records a stream to any writer, [`TraceReader`] parses
//! one back, and [`replay`]/[`replay_file`] drive every parsed event into
//! an [`EventDispatcher`](racewatch_analyzer::EventDispatcher).

mod error;
mod reader;
mod writer;

pub use error::{ReplayError, ReplayResult};
pub use reader::{read_trace, replay, replay_file, TraceReader};
pub use writer::{write_trace, TraceWriter};
