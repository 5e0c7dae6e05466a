//! Vector clocks for happens-before tracking.
//!
//! The analyzer keeps one clock per thread, two per variable (reads and
//! writes), and one per lock. All of them are [`VectorClock`] values; the
//! lattice operations here (`merge`, `le`, `compare`) are the entire
//! algebra the Djit+ update rules need.

mod vector_clock;

pub use vector_clock::{CausalOrder, VectorClock};
