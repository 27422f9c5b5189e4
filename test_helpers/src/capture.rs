//! A sink that keeps everything written to it.
//!
//! # Examples
//!
//! ```
//! use fieldlog::{Logger, fields};
//! use fieldlog_test_helpers::CaptureSink;
//!
//! let sink = CaptureSink::new();
//! Logger::new().with_sink(sink.clone()).write("hi", &fields!["n", 1]);
//! assert_eq!(sink.lines().len(), 1);
//! ```

use std::io;
use std::sync::Arc;

use anyhow::Result;
use fieldlog::Sink;
use parking_lot::Mutex;

use crate::lines::LogLine;

#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    writes: usize,
}

/// Records every line written to it. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    inner: Arc<Mutex<Captured>>,
}

impl CaptureSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().bytes).into_owned()
    }

    /// Written lines without their terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Number of `write_line` calls received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Parses every written line as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first line that is not a JSON object.
    pub fn records(&self) -> Result<Vec<LogLine>> {
        self.lines().iter().map(|line| LogLine::parse(line)).collect()
    }

    /// Parses the only line written so far.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one line was written and it parses.
    pub fn single(&self) -> Result<LogLine> {
        let mut records = self.records()?;
        anyhow::ensure!(
            records.len() == 1,
            "expected exactly one line, found {}",
            records.len()
        );
        records
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no line was written"))
    }
}

impl Sink for CaptureSink {
    fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut captured = self.inner.lock();
        captured.bytes.extend_from_slice(line);
        captured.writes += 1;
        Ok(())
    }
}
