//! Race reporting for RaceWatch.
//!
//! The analyzer surfaces races through callbacks and its final state
//! through snapshots; this crate turns both into something a person can
//! read:
//!
//! - [`RaceCollector`] — accumulates every violation, in order
//! - [`violation_line`] / [`write_report`] — one-line-per-race text
//! - [`render_snapshot`] — the post-mortem clock dump

mod collector;
mod format;

pub use collector::RaceCollector;
pub use format::{render_snapshot, violation_line, write_report};
