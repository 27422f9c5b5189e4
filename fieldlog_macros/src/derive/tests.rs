//! Unit tests for `#[derive(Record)]` expansion.

use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::expand;
use super::parse::{RenameAll, parse_input};

fn member_names(input: &DeriveInput) -> Vec<String> {
    let (_, members) = parse_input(input).expect("input parses");
    members.into_iter().map(|member| member.name).collect()
}

fn expansion_error(input: &DeriveInput) -> String {
    match expand(input) {
        Ok(tokens) => panic!("expected an error, got {tokens}"),
        Err(err) => err.to_string(),
    }
}

#[test]
fn members_follow_declaration_order() {
    let input: DeriveInput = parse_quote! {
        struct Request {
            method: String,
            path: String,
            status: u16,
        }
    };
    assert_eq!(member_names(&input), ["method", "path", "status"]);
}

#[test]
fn raw_identifiers_lose_their_prefix() {
    let input: DeriveInput = parse_quote! {
        struct Token {
            r#type: String,
        }
    };
    assert_eq!(member_names(&input), ["type"]);
}

#[test]
fn rename_and_skip_are_honoured() {
    let input: DeriveInput = parse_quote! {
        struct User {
            #[fieldlog(rename = "id")]
            user_id: u64,
            #[fieldlog(skip)]
            password: String,
            name: String,
        }
    };
    assert_eq!(member_names(&input), ["id", "name"]);
}

#[rstest]
#[case::camel("camelCase", "requestId")]
#[case::pascal("PascalCase", "RequestId")]
#[case::kebab("kebab-case", "request-id")]
#[case::shouty("SCREAMING_SNAKE_CASE", "REQUEST_ID")]
#[case::snake("snake_case", "request_id")]
fn rename_all_applies_to_unrenamed_fields(#[case] style: &str, #[case] expected: &str) {
    let input: DeriveInput = parse_quote! {
        #[fieldlog(rename_all = #style)]
        struct Trace {
            request_id: u64,
            #[fieldlog(rename = "exact_name")]
            other: u64,
        }
    };
    assert_eq!(member_names(&input), [expected, "exact_name"]);
}

#[test]
fn rename_all_rejects_unknown_styles() {
    let err = RenameAll::parse("Title Case", proc_macro2::Span::call_site())
        .expect_err("unknown style");
    assert!(err.to_string().contains("unknown rename_all 'Title Case'"));
}

#[test]
fn expansion_targets_the_default_crate_path() {
    let input: DeriveInput = parse_quote! {
        struct Point {
            x: i32,
            y: i32,
        }
    };
    let tokens = expand(&input).expect("expands").to_string();
    assert!(tokens.contains("impl :: fieldlog :: ToValue for Point"));
    assert!(tokens.contains(":: fieldlog :: Value :: Record"));
    assert!(tokens.contains("\"x\""));
    assert!(tokens.contains("< i32 as :: fieldlog :: ToValue > :: to_value"));
    assert!(tokens.contains("& self . y"));
}

#[test]
fn crate_attribute_overrides_the_path() {
    let input: DeriveInput = parse_quote! {
        #[fieldlog(crate = "logging::fieldlog")]
        struct Point {
            x: i32,
        }
    };
    let tokens = expand(&input).expect("expands").to_string();
    assert!(tokens.contains("impl logging :: fieldlog :: ToValue for Point"));
    assert!(!tokens.starts_with("impl :: fieldlog"));
}

#[test]
fn type_parameters_gain_a_to_value_bound() {
    let input: DeriveInput = parse_quote! {
        struct Pair<'a, T, const N: usize> where T: Clone {
            label: &'a str,
            items: [T; N],
        }
    };
    let tokens = expand(&input).expect("expands").to_string();
    assert!(tokens.contains("impl < 'a , T , const N : usize >"));
    assert!(tokens.contains("T : Clone"));
    assert!(tokens.contains("T : :: fieldlog :: ToValue"));
    assert!(!tokens.contains("'a : :: fieldlog"));
}

#[rstest]
#[case::tuple(parse_quote! { struct Meters(f64); }, "Record requires named fields")]
#[case::unit(parse_quote! { struct Marker; }, "Record requires named fields")]
#[case::enumeration(parse_quote! { enum Level { Info, Warn } }, "Record can only be derived for structs")]
#[case::union(parse_quote! { union Bits { int: u32, float: f32 } }, "Record can only be derived for structs")]
fn unsupported_shapes_are_rejected(#[case] input: DeriveInput, #[case] message: &str) {
    assert_eq!(expansion_error(&input), message);
}

#[rstest]
#[case::unknown_field_key(
    parse_quote! { struct S { #[fieldlog(flatten)] a: u8 } },
    "unknown fieldlog field attribute"
)]
#[case::unknown_struct_key(
    parse_quote! { #[fieldlog(transparent)] struct S { a: u8 } },
    "unknown fieldlog struct attribute"
)]
#[case::non_string_rename(
    parse_quote! { struct S { #[fieldlog(rename = 1)] a: u8 } },
    "rename must be a string"
)]
#[case::duplicate_names(
    parse_quote! { struct S { a: u8, #[fieldlog(rename = "a")] b: u8 } },
    "duplicate record member name 'a'"
)]
fn malformed_attributes_are_rejected(#[case] input: DeriveInput, #[case] fragment: &str) {
    let message = expansion_error(&input);
    assert!(message.contains(fragment), "unexpected error: {message}");
}
