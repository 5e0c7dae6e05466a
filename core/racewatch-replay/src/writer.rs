//! Trace recording.

use crate::error::ReplayResult;
use racewatch_types::TraceEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends events to a writer, one JSON object per line.
pub struct TraceWriter<W: Write> {
    inner: W,
}

impl<W: Write> TraceWriter<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Appends one event.
    pub fn write_event(&mut self, event: &TraceEvent) -> ReplayResult<()> {
        serde_json::to_writer(&mut self.inner, event)?;
        self.inner.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> ReplayResult<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwraps the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Writes a whole trace to a file, creating or truncating it.
pub fn write_trace(path: impl AsRef<Path>, events: &[TraceEvent]) -> ReplayResult<()> {
    let mut writer = TraceWriter::new(BufWriter::new(File::create(path)?));
    for event in events {
        writer.write_event(event)?;
    }
    writer.flush()
}
