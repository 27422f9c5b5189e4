//! Loading logger configuration from `FIELDLOG_*` variables.

use anyhow::{Result, ensure};
use fieldlog::{LogConfig, LogError, Logger, SinkTarget, TimestampPrecision};
use figment::providers::Serialized;
use test_helpers::{CaptureSink, config_from, with_env};

#[test]
fn environment_overrides_defaults() -> Result<()> {
    let config = config_from(&[
        ("FIELDLOG_TARGET", "stdout"),
        ("FIELDLOG_TIMESTAMP_PRECISION", "micros"),
        ("FIELDLOG_MAX_RETAINED_CAPACITY", "8192"),
    ])??;
    ensure!(config.target == SinkTarget::Stdout);
    ensure!(config.timestamp_precision == TimestampPrecision::Micros);
    ensure!(config.max_retained_capacity == 8192);
    ensure!(config.buffer_capacity == LogConfig::default().buffer_capacity);
    Ok(())
}

#[test]
fn malformed_sizes_surface_as_config_errors() -> Result<()> {
    let outcome = config_from(&[("FIELDLOG_BUFFER_CAPACITY", "lots")])?;
    ensure!(matches!(outcome, Err(LogError::Config(_))));
    let message = outcome.err().map(|err| err.to_string()).unwrap_or_default();
    ensure!(message.starts_with("Failed to load logging configuration"), "{message}");
    Ok(())
}

#[test]
fn configured_logger_uses_configured_precision() -> Result<()> {
    let config: LogConfig = with_env(&[("FIELDLOG_TIMESTAMP_PRECISION", "nanos")], |_| {
        LogConfig::figment()
            .merge(Serialized::default("max_pooled_buffers", 1))
            .extract()
    })??;
    ensure!(config.max_pooled_buffers == 1);

    let sink = CaptureSink::new();
    let logger = Logger::from_config(&config).with_sink(sink.clone());
    ensure!(logger.precision() == TimestampPrecision::Nanos);
    logger.write("configured", &[]);
    let line = sink.single()?;
    ensure!(line.timestamp()?.offset().is_utc());
    ensure!(line.raw().get(16..46).is_some_and(|text| text.ends_with('Z')));
    Ok(())
}
