//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait and
//! field name constants for building predicate programs.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_record_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut query_names: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;
        if record_attrs.skip {
            continue;
        }

        // Raw identifiers (`r#type`) query as their plain name
        let query_name = record_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        if query_names.contains(&query_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{query_name}'"),
            ));
        }

        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        field_constants.push(quote! {
            /// Field name constant for predicate programs.
            pub const #const_name: &'static str = #query_name;
        });

        field_matches.push(quote! {
            #query_name => ::core::option::Option::Some(
                ::casper::FieldValue::field_value(&self.#field_name)
            ),
        });

        query_names.push(query_name);
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*

            /// Queryable field names, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[#(#query_names),*];
        }

        impl #impl_generics ::casper::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::core::option::Option<::casper::Value<'_>> {
                match field {
                    #(#field_matches)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
