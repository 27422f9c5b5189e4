//! JSON string escaping.

use std::fmt;

/// Appends `text` to `out` with JSON escapes applied, without quotes.
///
/// Escapes `"`, `\` and the C0 control range. Everything else, including
/// non-ASCII text, is copied through in runs.
pub(crate) fn escape_into(text: &str, out: &mut String) {
    let mut start = 0;
    for (idx, byte) in text.bytes().enumerate() {
        let short = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0c => "\\f",
            0x00..=0x1f => "",
            _ => continue,
        };
        // Escaped bytes are ASCII, so `start..idx` always lies on char boundaries.
        out.push_str(text.get(start..idx).unwrap_or_default());
        if short.is_empty() {
            out.push_str("\\u00");
            out.push(hex_digit(byte >> 4));
            out.push(hex_digit(byte & 0x0f));
        } else {
            out.push_str(short);
        }
        start = idx + 1;
    }
    out.push_str(text.get(start..).unwrap_or_default());
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}

/// `fmt::Write` adapter escaping everything written through it.
///
/// Lets `Display` output stream straight into a JSON string without an
/// intermediate allocation.
pub(crate) struct Escaped<'a>(pub(crate) &'a mut String);

impl fmt::Write for Escaped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        escape_into(s, self.0);
        Ok(())
    }
}
