//! Attribute and input parsing for `#[derive(Record)]`.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr};

/// Case conventions accepted by `rename_all`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameAll {
    Snake,
    LowerCamel,
    UpperCamel,
    Kebab,
    ShoutySnake,
}

impl RenameAll {
    pub(crate) fn parse(value: &str, span: Span) -> syn::Result<Self> {
        match value {
            "snake_case" => Ok(Self::Snake),
            "camelCase" => Ok(Self::LowerCamel),
            "PascalCase" => Ok(Self::UpperCamel),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ShoutySnake),
            _ => Err(syn::Error::new(
                span,
                format!(
                    "unknown rename_all '{value}'; expected one of \"snake_case\", \"camelCase\", \
                     \"PascalCase\", \"kebab-case\" or \"SCREAMING_SNAKE_CASE\""
                ),
            )),
        }
    }

    pub(crate) fn apply(self, name: &str) -> String {
        match self {
            Self::Snake => name.to_snake_case(),
            Self::LowerCamel => name.to_lower_camel_case(),
            Self::UpperCamel => name.to_upper_camel_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ShoutySnake => name.to_shouty_snake_case(),
        }
    }
}

/// Struct-level `#[fieldlog(...)]` settings.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Overrides the `fieldlog` path in generated code.
    pub crate_path: Option<syn::Path>,
    pub rename_all: Option<RenameAll>,
}

impl StructAttrs {
    /// Path generated code uses to reach `fieldlog`, `::fieldlog` unless
    /// overridden.
    pub(crate) fn krate(&self) -> TokenStream {
        self.crate_path
            .as_ref()
            .map_or_else(|| quote! { ::fieldlog }, |path| quote! { #path })
    }
}

/// Field-level `#[fieldlog(...)]` settings.
#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub rename: Option<LitStr>,
    pub skip: bool,
}

/// A field that will appear in the record.
pub(crate) struct Member {
    /// The field as accessed on `self`.
    pub ident: syn::Ident,
    /// The member name written to the log.
    pub name: String,
    pub ty: syn::Type,
}

/// Iterate all `#[fieldlog(...)]` attributes and apply a callback to each key.
fn parse_fieldlog<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("fieldlog")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let value = meta.value()?;
    value
        .parse::<LitStr>()
        .map_err(|err| syn::Error::new(err.span(), format!("{key} must be a string")))
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_fieldlog(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit = lit_str(meta, "crate")?;
            out.crate_path = Some(lit.parse()?);
            Ok(())
        } else if meta.path.is_ident("rename_all") {
            let lit = lit_str(meta, "rename_all")?;
            out.rename_all = Some(RenameAll::parse(&lit.value(), lit.span())?);
            Ok(())
        } else {
            Err(meta.error("unknown fieldlog struct attribute; expected `crate` or `rename_all`"))
        }
    })?;
    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_fieldlog(attrs, |meta| {
        if meta.path.is_ident("rename") {
            out.rename = Some(lit_str(meta, "rename")?);
            Ok(())
        } else if meta.path.is_ident("skip") {
            out.skip = true;
            Ok(())
        } else {
            Err(meta.error("unknown fieldlog field attribute; expected `rename` or `skip`"))
        }
    })?;
    Ok(out)
}

/// Collects the struct-level settings and the members to emit.
///
/// Rejects anything but a struct with named fields, and two members that
/// share a name.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<(StructAttrs, Vec<Member>)> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut members: Vec<Member> = Vec::with_capacity(named.len());
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let (name, span) = match attrs.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => {
                let plain = ident.unraw().to_string();
                let cased = struct_attrs
                    .rename_all
                    .map_or_else(|| plain.clone(), |case| case.apply(&plain));
                (cased, ident.span())
            }
        };
        if members.iter().any(|member| member.name == name) {
            return Err(syn::Error::new(
                span,
                format!("duplicate record member name '{name}'"),
            ));
        }
        members.push(Member {
            ident,
            name,
            ty: field.ty.clone(),
        });
    }
    Ok((struct_attrs, members))
}
