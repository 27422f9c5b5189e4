//! RFC 3339 timestamps in UTC.

use serde::Deserialize;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const SECONDS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
const MILLIS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
const MICROS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");
const NANOS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z");

/// Longest rendering of any supported precision, with room for a signed
/// six-digit year.
const MAX_LEN: usize = 40;

/// Fractional-second digits written in the `timestamp` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum TimestampPrecision {
    /// Whole seconds, e.g. `2024-05-01T09:30:00Z`.
    #[default]
    Seconds,
    /// Milliseconds.
    Millis,
    /// Microseconds.
    Micros,
    /// Nanoseconds.
    Nanos,
}

impl TimestampPrecision {
    const fn description(self) -> &'static [BorrowedFormatItem<'static>] {
        match self {
            Self::Seconds => SECONDS,
            Self::Millis => MILLIS,
            Self::Micros => MICROS,
            Self::Nanos => NANOS,
        }
    }
}

/// Appends the current UTC time to `out`.
pub(crate) fn write_now(precision: TimestampPrecision, out: &mut String) -> Result<(), time::error::Format> {
    write_at(OffsetDateTime::now_utc(), precision, out)
}

/// Appends `at`, converted to UTC, to `out` without allocating.
pub(crate) fn write_at(
    at: OffsetDateTime,
    precision: TimestampPrecision,
    out: &mut String,
) -> Result<(), time::error::Format> {
    let mut buf = [0_u8; MAX_LEN];
    let mut cursor = buf.as_mut_slice();
    at.to_offset(time::UtcOffset::UTC)
        .format_into(&mut cursor, precision.description())?;
    let written = MAX_LEN - cursor.len();
    let text = buf.get(..written).and_then(|bytes| std::str::from_utf8(bytes).ok());
    out.push_str(text.unwrap_or_default());
    Ok(())
}
