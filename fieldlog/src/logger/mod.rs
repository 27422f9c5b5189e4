//! The logger: persistent context fields plus a sink.
//!
//! A [`Logger`] is an immutable value. [`Logger::with`] and
//! [`Logger::with_sink`] return new loggers and leave the receiver untouched,
//! so a logger can be cloned freely and shared between threads.

use std::fmt;
use std::sync::Arc;

use crate::config::{LogConfig, SinkTarget};
use crate::encode::encode_str;
use crate::error::LogResult;
use crate::field::{EncodedFields, encode_field_list, encode_pairs};
use crate::merge::{MergedView, merge};
use crate::pool::{BufferPool, Scratch};
use crate::sink::{Sink, Stderr, Stdout};
use crate::timestamp::{self, TimestampPrecision};
use crate::value::Value;


/// Keys the line header always writes; fields with these keys are dropped.
const RESERVED_KEYS: [&str; 2] = ["\"timestamp\"", "\"message\""];

/// Writes JSON log lines carrying a fixed set of context fields.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use fieldlog::{LockedWriter, Logger, fields};
///
/// let sink = Arc::new(LockedWriter::new(Vec::new()));
/// let logger = Logger::new()
///     .with_sink(Arc::clone(&sink))
///     .with(&fields!["request_id", "8f14e45f"]);
/// logger.write("request served", &fields!["status", 200]);
///
/// let line = sink.with_inner(|bytes| String::from_utf8(bytes.clone()).expect("utf-8"));
/// assert!(line.ends_with(
///     "\"message\": \"request served\", \"request_id\": \"8f14e45f\", \"status\": 200 }\n"
/// ));
/// ```
#[derive(Clone)]
pub struct Logger {
    context: EncodedFields,
    sink: Option<Arc<dyn Sink>>,
    precision: TimestampPrecision,
    pool: Arc<BufferPool>,
}

impl Logger {
    /// A logger with no context that writes to standard error.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context: EncodedFields::new(),
            sink: None,
            precision: TimestampPrecision::default(),
            pool: BufferPool::shared(),
        }
    }

    /// A logger with no context, set up from `config`.
    ///
    /// The logger gets a buffer pool of its own, sized by `config`.
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        let sink: Arc<dyn Sink> = match config.target {
            SinkTarget::Stdout => Arc::new(Stdout),
            SinkTarget::Stderr => Arc::new(Stderr),
        };
        Self {
            context: EncodedFields::new(),
            sink: Some(sink),
            precision: config.timestamp_precision,
            pool: Arc::new(BufferPool::from_config(config)),
        }
    }

    /// Returns a copy of this logger that writes to `sink`.
    #[must_use]
    pub fn with_sink<S: Sink + 'static>(&self, sink: S) -> Self {
        self.with_shared_sink(Arc::new(sink))
    }

    /// Returns a copy of this logger that writes to an already shared sink.
    #[must_use]
    pub fn with_shared_sink(&self, sink: Arc<dyn Sink>) -> Self {
        Self {
            sink: Some(sink),
            ..self.clone()
        }
    }

    /// Returns a copy of this logger with the given timestamp precision.
    #[must_use]
    pub fn with_precision(&self, precision: TimestampPrecision) -> Self {
        Self {
            precision,
            ..self.clone()
        }
    }

    /// Returns a copy of this logger with `fields` added to its context.
    ///
    /// `fields` is an alternating key/value list, usually built with
    /// [`fields!`](crate::fields). New fields replace context fields with the
    /// same key; among duplicates in `fields` the last one wins. Values are
    /// encoded immediately, so later changes to the originals are not seen.
    #[must_use]
    pub fn with(&self, fields: &[Value<'_>]) -> Self {
        let fresh = merge(&EncodedFields::new(), &encode_field_list(fields));
        Self {
            context: merge(&fresh, &self.context),
            ..self.clone()
        }
    }

    /// The logger's context fields.
    #[must_use]
    pub const fn context(&self) -> &EncodedFields {
        &self.context
    }

    /// The precision used for the `timestamp` field.
    #[must_use]
    pub const fn precision(&self) -> TimestampPrecision {
        self.precision
    }

    /// Writes one line with `message` and `fields` on top of the context.
    ///
    /// Failures are reported through `tracing` and otherwise ignored; use
    /// [`Self::try_write`] to handle them.
    pub fn write(&self, message: &str, fields: &[Value<'_>]) {
        if let Err(err) = self.try_write(message, fields) {
            tracing::warn!(error = %err, "failed to write log line");
        }
    }

    /// Writes one line with `message` and `fields` on top of the context.
    ///
    /// The line is a single JSON object: `timestamp`, then `message`, then
    /// context fields not overridden by `fields`, then `fields` with the last
    /// of any duplicates winning. Fields named `timestamp` or `message` are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Sink`](crate::LogError::Sink) if the sink rejects
    /// the line, or [`LogError::Timestamp`](crate::LogError::Timestamp) if
    /// the clock cannot be rendered.
    pub fn try_write(&self, message: &str, fields: &[Value<'_>]) -> LogResult<()> {
        let mut scratch = self.pool.acquire();
        let Scratch { line, arena, spans } = &mut *scratch;
        encode_pairs(fields, arena, spans);

        line.push_str("{ \"timestamp\": \"");
        timestamp::write_now(self.precision, line)?;
        line.push_str("\", \"message\": ");
        encode_str(message, line);
        for (key, value) in MergedView::new(self.context.as_slice(), spans, arena) {
            if RESERVED_KEYS.contains(&key) {
                tracing::debug!(key, "dropping field with a reserved key");
                continue;
            }
            line.push_str(", ");
            line.push_str(key);
            line.push_str(": ");
            line.push_str(value);
        }
        line.push_str(" }\n");

        match &self.sink {
            Some(sink) => sink.write_line(line.as_bytes())?,
            None => Stderr.write_line(line.as_bytes())?,
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("custom_sink", &self.sink.is_some())
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

/// Loggers are equal when they hold the same context, precision and sink.
impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        let same_sink = match (&self.sink, &other.sink) {
            (None, None) => true,
            (Some(ours), Some(theirs)) => Arc::ptr_eq(ours, theirs),
            _ => false,
        };
        same_sink && self.precision == other.precision && self.context == other.context
    }
}
