//! Trace parsing and replay.

use crate::error::{ReplayError, ReplayResult};
use racewatch_analyzer::EventDispatcher;
use racewatch_types::TraceEvent;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Parses a JSON-lines trace from any buffered reader.
///
/// Iterates `ReplayResult<TraceEvent>`; blank lines are skipped. A parse
/// failure carries the 1-based line number and does not end the
/// iteration, so a caller may choose to skip bad lines.
pub struct TraceReader<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader positioned at the start of a trace.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            buf: String::new(),
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> ReplayResult<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = ReplayResult<TraceEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return Some(serde_json::from_str(line).map_err(|source| ReplayError::Parse {
                line: self.line,
                source,
            }));
        }
    }
}

/// Reads a whole trace file into memory.
pub fn read_trace(path: impl AsRef<Path>) -> ReplayResult<Vec<TraceEvent>> {
    TraceReader::open(path)?.collect()
}

/// Drives every event from a reader into the dispatcher, in order.
/// Returns the number of events delivered. Stops at the first bad line.
pub fn replay<R: BufRead>(
    reader: TraceReader<R>,
    dispatcher: &EventDispatcher,
) -> ReplayResult<usize> {
    let mut delivered = 0;
    for event in reader {
        dispatcher.submit(&event?);
        delivered += 1;
    }
    debug!("replay delivered {} events", delivered);
    Ok(delivered)
}

/// Replays a trace file into the dispatcher.
pub fn replay_file(path: impl AsRef<Path>, dispatcher: &EventDispatcher) -> ReplayResult<usize> {
    replay(TraceReader::open(path)?, dispatcher)
}
