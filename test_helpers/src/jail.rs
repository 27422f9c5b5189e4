//! Environment isolation for configuration tests.
//!
//! Variables are set inside a [`figment::Jail`], so they never leak into the
//! environment other tests observe.

use anyhow::{Context, Result, anyhow};
use fieldlog::{LogConfig, LogResult};
use figment::Jail;

/// Runs `f` in a jail with each `(name, value)` in `vars` set.
///
/// The jail restores the environment once `f` returns. Its output is handed
/// back untouched, so `f` may itself return a `Result` for the caller to
/// inspect.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up.
pub fn with_env<F, T>(vars: &[(&str, &str)], f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> T,
{
    let mut output = None;
    Jail::try_with(|jail| {
        for (name, value) in vars {
            jail.set_env(name, value);
        }
        output = Some(f(jail));
        Ok(())
    })
    .map_err(|err| anyhow!("jail failed: {err}"))?;
    output.context("jail did not run its closure")
}

/// Loads a [`LogConfig`] with only `vars` set.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up. Configuration failures are
/// returned in the inner result.
pub fn config_from(vars: &[(&str, &str)]) -> Result<LogResult<LogConfig>> {
    with_env(vars, |_| LogConfig::from_env())
}
