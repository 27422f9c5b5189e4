//! Unit tests for `ToValue` conversions.

use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use rstest::rstest;

use super::{ToValue, Value};

fn debug_of<T: ToValue>(value: T) -> String {
    format!("{:?}", value.to_value())
}

#[rstest]
#[case::i8(debug_of(i8::MIN), "I64(-128)")]
#[case::i16(debug_of(i16::MAX), "I64(32767)")]
#[case::i32(debug_of(-7_i32), "I64(-7)")]
#[case::isize(debug_of(-9_isize), "I64(-9)")]
#[case::u8(debug_of(u8::MAX), "U64(255)")]
#[case::u32(debug_of(u32::MAX), "U64(4294967295)")]
#[case::usize(debug_of(12_usize), "U64(12)")]
#[case::i128(debug_of(-1_i128), "I128(-1)")]
#[case::f32(debug_of(1.5_f32), "F32(1.5)")]
fn integers_and_floats_widen(#[case] actual: String, #[case] expected: &str) {
    assert_eq!(actual, expected);
}

#[test]
fn options_map_none_to_null() {
    let missing: Option<&str> = None;
    let present = Some("here");
    assert!(missing.to_value().is_null());
    assert_eq!(present.to_value().as_str(), Some("here"));
}

#[test]
fn unit_is_null() {
    assert!(().to_value().is_null());
}

#[test]
fn chars_render_as_strings_but_are_not_keys() {
    let letter = 'x';
    assert_eq!(letter.to_value().as_str(), None);
    assert_eq!(crate::encode_to_string(&letter.to_value()).as_deref(), Some("\"x\""));
}

#[test]
fn maps_keyed_by_char_drop_every_entry() {
    let map = std::collections::BTreeMap::from([('a', 1), ('b', 2)]);
    assert!(matches!(map.to_value(), Value::Map(entries) if entries.is_empty()));
}

#[test]
fn text_types_borrow() {
    let owned = String::from("owned");
    let shared: Arc<str> = Arc::from("shared");
    let cow: Cow<'_, str> = Cow::Borrowed("cow");
    let boxed: Box<str> = Box::from("boxed");
    assert!(matches!(owned.to_value(), Value::Str(Cow::Borrowed("owned"))));
    assert!(matches!(shared.to_value(), Value::Str(Cow::Borrowed("shared"))));
    assert!(matches!(cow.to_value(), Value::Str(Cow::Borrowed("cow"))));
    assert!(matches!(boxed.to_value(), Value::Str(Cow::Borrowed("boxed"))));
}

#[test]
fn paths_become_text() {
    let path = PathBuf::from("/var/log/app.log");
    assert_eq!(path.to_value().as_str(), Some("/var/log/app.log"));
}

#[test]
fn sequences_convert_each_element() {
    let deque = VecDeque::from([1_u8, 2]);
    let Value::Seq(items) = deque.to_value() else {
        panic!("expected a sequence");
    };
    assert_eq!(items.len(), 2);
    assert!(matches!(items.first(), Some(Value::U64(1))));
}

#[test]
fn maps_keep_only_text_keys() {
    let text_keyed = HashMap::from([("woo", 1)]);
    let Value::Map(entries) = text_keyed.to_value() else {
        panic!("expected a map");
    };
    assert_eq!(entries.len(), 1);

    let int_keyed = HashMap::from([(1, "one")]);
    let Value::Map(dropped) = int_keyed.to_value() else {
        panic!("expected a map");
    };
    assert!(dropped.is_empty());
}

#[test]
fn boxed_errors_convert_to_error_values() {
    let err: Box<dyn std::error::Error + Send + Sync> = "boom".into();
    let value = err.to_value();
    assert!(matches!(value, Value::Error(e) if e.to_string() == "boom"));
}

#[test]
fn values_reborrow_through_to_value() {
    let original = Value::Seq(vec![
        Value::str("a"),
        Value::Map(vec![(Cow::Borrowed("k"), Value::Null)]),
    ]);
    let copy = original.to_value();
    assert_eq!(format!("{copy:?}"), format!("{original:?}"));
}
