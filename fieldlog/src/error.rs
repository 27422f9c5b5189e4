//! Errors surfaced by the fallible logging entry points.

use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that can occur while emitting a line or loading configuration.
///
/// [`Logger::write`](crate::Logger::write) never returns these; it reports
/// them through `tracing` and carries on. Use
/// [`Logger::try_write`](crate::Logger::try_write) to observe them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// The sink rejected the line.
    #[error("Failed to write log line: {0}")]
    Sink(#[from] std::io::Error),

    /// The current time could not be rendered.
    #[error("Failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// Logging configuration could not be extracted from its providers.
    #[error("Failed to load logging configuration: {0}")]
    Config(#[from] Box<FigmentError>),
}

/// Result alias used by the fallible logging entry points.
pub type LogResult<T> = Result<T, LogError>;

impl From<FigmentError> for LogError {
    fn from(error: FigmentError) -> Self {
        Self::Config(Box::new(error))
    }
}
