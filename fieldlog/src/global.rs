//! The process-wide default logger and free-function shortcuts to it.

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::logger::Logger;
use crate::sink::Sink;
use crate::value::Value;

static DEFAULT: LazyLock<RwLock<Logger>> = LazyLock::new(|| RwLock::new(Logger::new()));

/// A copy of the default logger.
///
/// Until [`set_default_logger`] is called this is an empty logger writing to
/// standard error.
#[must_use]
pub fn default_logger() -> Logger {
    DEFAULT.read().clone()
}

/// Replaces the default logger, returning the previous one.
pub fn set_default_logger(logger: Logger) -> Logger {
    std::mem::replace(&mut *DEFAULT.write(), logger)
}

/// The default logger writing to `sink`.
#[must_use]
pub fn with_sink<S: Sink + 'static>(sink: S) -> Logger {
    default_logger().with_sink(sink)
}

/// The default logger with `fields` added to its context.
#[must_use]
pub fn with(fields: &[Value<'_>]) -> Logger {
    default_logger().with(fields)
}

/// Writes one line through the default logger.
///
/// The lock is released before the sink is called, so a sink may itself log
/// or replace the default.
pub fn write(message: &str, fields: &[Value<'_>]) {
    default_logger().write(message, fields);
}
