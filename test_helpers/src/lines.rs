//! Parsed views of emitted log lines.

use anyhow::{Context, Result, anyhow, ensure};
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// One log line, parsed as a JSON object with its key order preserved.
#[derive(Clone, Debug)]
pub struct LogLine {
    raw: String,
    fields: Map<String, Value>,
}

impl LogLine {
    /// Parses `raw`, which may still carry its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a single JSON object.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.strip_suffix('\n').unwrap_or(raw);
        ensure!(!trimmed.contains('\n'), "log line spans several lines: {raw:?}");
        let value: Value =
            serde_json::from_str(trimmed).with_context(|| format!("invalid JSON: {trimmed}"))?;
        let Value::Object(fields) = value else {
            return Err(anyhow!("log line is not an object: {trimmed}"));
        };
        Ok(Self {
            raw: trimmed.to_owned(),
            fields,
        })
    }

    /// The line as written, without its terminator.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Keys in the order they were written.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields as a JSON object.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The `message` field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or not a string.
    pub fn message(&self) -> Result<&str> {
        self.get("message")
            .and_then(Value::as_str)
            .context("line has no string message")
    }

    /// The `timestamp` field, parsed as RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or malformed.
    pub fn timestamp(&self) -> Result<OffsetDateTime> {
        let text = self
            .get("timestamp")
            .and_then(Value::as_str)
            .context("line has no string timestamp")?;
        OffsetDateTime::parse(text, &Rfc3339).with_context(|| format!("bad timestamp {text}"))
    }

    /// The raw line with the timestamp value replaced by `<ts>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not open with the timestamp.
    pub fn masked(&self) -> Result<String> {
        let prefix = "{ \"timestamp\": \"";
        let rest = self
            .raw
            .strip_prefix(prefix)
            .context("line does not open with the timestamp")?;
        let end = rest.find('"').context("timestamp is not terminated")?;
        let tail = rest.get(end..).context("timestamp end is not a boundary")?;
        Ok(format!("{prefix}<ts>{tail}"))
    }
}

/// Checks that `at` lies within `tolerance` of the current time.
///
/// # Errors
///
/// Returns an error describing the drift when it exceeds `tolerance`.
pub fn assert_recent(at: OffsetDateTime, tolerance: Duration) -> Result<()> {
    let drift = (OffsetDateTime::now_utc() - at).abs();
    ensure!(
        drift <= tolerance,
        "timestamp {at} is {drift} away from now, beyond {tolerance}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for log line parsing.

    use super::LogLine;

    #[test]
    fn keys_keep_their_written_order() {
        let line = LogLine::parse("{ \"timestamp\": \"2024-05-01T09:30:07Z\", \"message\": \"m\", \"z\": 1, \"a\": 2 }\n")
            .expect("line parses");
        assert_eq!(line.keys(), ["timestamp", "message", "z", "a"]);
        assert_eq!(line.message().expect("message"), "m");
        assert_eq!(
            line.masked().expect("masked"),
            "{ \"timestamp\": \"<ts>\", \"message\": \"m\", \"z\": 1, \"a\": 2 }"
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(LogLine::parse("[1, 2]").is_err());
        assert!(LogLine::parse("{ \"a\": 1 }\n{ \"b\": 2 }\n").is_err());
    }
}
