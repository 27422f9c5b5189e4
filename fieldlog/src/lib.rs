//! Structured JSON line logging with persistent context fields.
//!
//! A [`Logger`] carries a set of context fields and writes one JSON object per
//! line: a `timestamp`, the `message`, the context fields and any fields given
//! to the call. Fields are passed as an alternating key/value list, normally
//! built with [`fields!`]:
//!
//! ```
//! use std::sync::Arc;
//!
//! use fieldlog::{LockedWriter, Logger, fields};
//!
//! let sink = Arc::new(LockedWriter::new(Vec::new()));
//! let logger = Logger::new()
//!     .with_sink(Arc::clone(&sink))
//!     .with(&fields!["service", "billing"]);
//! logger.write("invoice sent", &fields!["invoice", 1042, "retry", false]);
//! ```
//!
//! produces a line such as
//!
//! ```text
//! { "timestamp": "2024-05-01T09:30:07Z", "message": "invoice sent", "service": "billing", "invoice": 1042, "retry": false }
//! ```
//!
//! Call fields win over context fields with the same key, and the last of
//! several duplicate call fields wins. Pairs whose key is not text or whose
//! value cannot be represented in JSON are dropped without error. The derive
//! macro [`Record`] makes structs loggable as nested objects.

pub use fieldlog_macros::Record;

mod config;
mod encode;
mod error;
mod field;
mod global;
mod logger;
mod merge;
mod pool;
pub mod scope;
mod sink;
mod timestamp;
mod value;

pub use config::{LogConfig, SinkTarget};
pub use encode::{encode, encode_str, encode_to_string};
pub use error::{LogError, LogResult};
pub use field::{EncodedField, EncodedFields, encode_field_list};
pub use global::{default_logger, set_default_logger, with, with_sink, write};
pub use logger::Logger;
pub use merge::{merge, merge_call_over_context};
pub use pool::BufferPool;
pub use scope::ScopeGuard;
pub use sink::{LockedWriter, Sink, Stderr, Stdout};
pub use timestamp::TimestampPrecision;
pub use value::{ToValue, Value};

/// Builds an alternating key/value list of [`Value`]s from expressions.
///
/// Each expression is converted with [`ToValue`], borrowing where it can.
///
/// # Examples
///
/// ```
/// use fieldlog::{Value, fields};
///
/// let user = String::from("ada");
/// let list = fields!["user", user, "attempts", 3, "locked", None::<bool>];
/// assert_eq!(list.len(), 6);
/// assert_eq!(list[1].as_str(), Some("ada"));
/// assert!(matches!(list[3], Value::I64(3)));
/// assert!(list[5].is_null());
/// ```
#[macro_export]
macro_rules! fields {
    () => {{
        let empty: [$crate::Value<'static>; 0] = [];
        empty
    }};
    ($($item:expr),+ $(,)?) => {
        [$($crate::ToValue::to_value(&$item)),+]
    };
}
