//! Unit tests for the field list builder.

use std::collections::BTreeMap;

use rstest::rstest;

use super::{EncodedField, EncodedFields, encode_field_list, encode_pairs};
use crate::value::Value;
use crate::{ToValue, fields};

fn keys(fields: &EncodedFields) -> Vec<&str> {
    fields.iter().map(EncodedField::key).collect()
}

#[test]
fn pairs_keep_input_order_and_duplicates() {
    let encoded = encode_field_list(&fields!["tomato", 1, "potato", 2, "tomato", 3]);
    assert_eq!(keys(&encoded), ["\"tomato\"", "\"potato\"", "\"tomato\""]);
    let values: Vec<&str> = encoded.iter().map(EncodedField::value).collect();
    assert_eq!(values, ["1", "2", "3"]);
}

#[rstest]
#[case::integer_key(fields![1, "one", "kept", true].to_vec())]
#[case::null_key(fields![(), "nothing", "kept", true].to_vec())]
#[case::dangling_key(fields!["kept", true, "dangling"].to_vec())]
#[case::unrepresentable_value(fields!["nan", f64::NAN, "kept", true].to_vec())]
fn malformed_pairs_are_dropped(#[case] values: Vec<Value<'static>>) {
    let encoded = encode_field_list(&values);
    assert_eq!(keys(&encoded), ["\"kept\""]);
    assert_eq!(encoded.get("kept"), Some("true"));
}

#[test]
fn empty_input_builds_empty_sequence() {
    assert!(encode_field_list(&[]).is_empty());
    assert!(encode_field_list(&fields!["dangling"]).is_empty());
}

#[test]
fn dropped_values_leave_no_residue_in_the_arena() {
    let mut arena = String::new();
    let mut spans = Vec::new();
    let bad: BTreeMap<&str, f64> = BTreeMap::from([("x", f64::INFINITY)]);
    let empty_record: Value<'_> = Value::Record(Vec::new());
    let values = [
        "a".to_value(),
        Value::I64(1),
        "bad".to_value(),
        empty_record,
        "b".to_value(),
        Value::Unsupported,
        "c".to_value(),
        bad.to_value(),
    ];
    encode_pairs(&values, &mut arena, &mut spans);
    assert_eq!(spans.len(), 2);
    assert_eq!(arena, "\"a\"1\"c\"{  }");
}

#[test]
fn keys_are_escaped() {
    let encoded = encode_field_list(&fields!["say \"hi\"", "ok"]);
    assert_eq!(keys(&encoded), ["\"say \\\"hi\\\"\""]);
    assert_eq!(encoded.get("say \"hi\""), Some("\"ok\""));
}

#[test]
fn owned_fields_outlive_their_source() {
    let encoded = {
        let mut map = BTreeMap::new();
        map.insert("inner".to_owned(), 7_u8);
        let values = fields!["map", map];
        encode_field_list(&values)
    };
    assert_eq!(encoded.get("map"), Some("{ \"inner\": 7 }"));
}

#[test]
fn single_field_encoding() {
    let field = EncodedField::encode("flag", &Value::Bool(false));
    assert_eq!(format!("{field:?}"), "Some(\"flag\": false)");
    assert!(EncodedField::encode("flag", &Value::F64(f64::NAN)).is_none());
}

#[test]
fn lookup_misses_unknown_keys() {
    let encoded = encode_field_list(&fields!["present", 1]);
    assert_eq!(encoded.get("absent"), None);
    assert_eq!(encoded.get("\"present\""), None);
}
