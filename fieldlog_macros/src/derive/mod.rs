//! Expansion of `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, GenericParam, parse_quote};

mod parse;

#[cfg(test)]
mod tests;

/// Generates the `ToValue` implementation for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (struct_attrs, members) = parse::parse_input(input)?;
    let krate = struct_attrs.krate();

    let mut generics = input.generics.clone();
    let type_params: Vec<syn::Ident> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: #krate::ToValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let ident = &input.ident;
    let entries = members.iter().map(|member| {
        let field = &member.ident;
        let name = &member.name;
        let ty = &member.ty;
        quote! {
            (#name, <#ty as #krate::ToValue>::to_value(&self.#field))
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::ToValue for #ident #ty_generics #where_clause {
            fn to_value(&self) -> #krate::Value<'_> {
                #krate::Value::Record(::std::vec![#(#entries),*])
            }
        }
    })
}
