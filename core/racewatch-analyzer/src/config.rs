//! Analyzer configuration.

use serde::{Deserialize, Serialize};

/// How the analyzer treats events naming unregistered variables and locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Create zero clocks for a variable or lock on first access.
    ///
    /// Suits replay and language-level tracing, where every access in the
    /// stream is of interest.
    #[default]
    Lazy,

    /// Track only explicitly registered variables and locks.
    ///
    /// Events touching anything else are dropped, including acquire and
    /// release on unwatched locks. Suits instrumentation front-ends that
    /// watch a fixed symbol set.
    WatchSet,
}

/// Configuration for an [`Analyzer`](crate::Analyzer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Entity-creation policy, fixed for the analyzer's lifetime.
    pub policy: CreationPolicy,
}

impl AnalyzerConfig {
    /// Configuration that tracks only registered entities.
    #[must_use]
    pub fn watch_set() -> Self {
        Self {
            policy: CreationPolicy::WatchSet,
        }
    }
}
