//! Logger configuration loaded from defaults and `FIELDLOG_*` environment
//! variables.

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

use crate::error::LogResult;
use crate::timestamp::TimestampPrecision;

/// Standard stream a configured logger writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SinkTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Settings for [`Logger::from_config`](crate::Logger::from_config).
///
/// Every field is optional in the sources; missing fields take the
/// [`Default`] values.
///
/// # Examples
///
/// ```
/// use fieldlog::{LogConfig, Logger, TimestampPrecision};
///
/// let config = LogConfig {
///     timestamp_precision: TimestampPrecision::Millis,
///     ..LogConfig::default()
/// };
/// let logger = Logger::from_config(&config);
/// assert_eq!(logger.precision(), TimestampPrecision::Millis);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Where lines are written.
    pub target: SinkTarget,
    /// Fractional-second digits in the `timestamp` field.
    pub timestamp_precision: TimestampPrecision,
    /// Initial capacity, in bytes, of each pooled line buffer.
    pub buffer_capacity: usize,
    /// Maximum number of idle buffers kept for reuse.
    pub max_pooled_buffers: usize,
    /// Buffers that grew beyond this many bytes are released rather than
    /// pooled.
    pub max_retained_capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            target: SinkTarget::Stderr,
            timestamp_precision: TimestampPrecision::Seconds,
            buffer_capacity: 1024,
            max_pooled_buffers: 64,
            max_retained_capacity: 64 * 1024,
        }
    }
}

impl LogConfig {
    /// Prefix shared by the environment variables read by [`Self::from_env`].
    pub const ENV_PREFIX: &'static str = "FIELDLOG_";

    /// The provider stack used by [`Self::from_env`].
    ///
    /// Callers may merge further providers on top before extracting.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::new().merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads configuration from `FIELDLOG_*` environment variables, e.g.
    /// `FIELDLOG_TIMESTAMP_PRECISION=millis`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Config`](crate::LogError::Config) when a variable
    /// holds a value of the wrong type.
    pub fn from_env() -> LogResult<Self> {
        Ok(Self::figment().extract()?)
    }
}
