//! Procedural macros for `fieldlog`.
//!
//! [`Record`] implements `fieldlog::ToValue` for a struct with named fields,
//! so the struct logs as a nested JSON object with one member per field.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `fieldlog::ToValue`.
///
/// Members appear in declaration order. Field attributes:
///
/// - `#[fieldlog(rename = "name")]` sets the member name.
/// - `#[fieldlog(skip)]` leaves the field out.
///
/// Struct attributes:
///
/// - `#[fieldlog(rename_all = "camelCase")]` applies a case convention to
///   fields without an explicit `rename`. Accepts `snake_case`, `camelCase`,
///   `PascalCase`, `kebab-case` and `SCREAMING_SNAKE_CASE`.
/// - `#[fieldlog(crate = "path")]` names the `fieldlog` crate when it is
///   re-exported under another path.
#[proc_macro_derive(Record, attributes(fieldlog))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
