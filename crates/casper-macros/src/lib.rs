//! Proc macros for Casper.
//!
//! # Derive Macros
//!
//! - [`Record`] - Generate the named-field lookup used by predicate programs
//!
//! The generated code refers to items through the `casper` crate, so use the
//! derive through `casper::Record` rather than depending on this crate
//! directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derives the `Record` trait for queryable structs.
///
/// Every named field is queryable by its name unless marked otherwise. Field
/// types must implement `casper::FieldValue` (strings, numbers, `bool`,
/// `char`, and `Option` of these).
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Person::NAME`, `Person::AGE`)
/// 2. `FIELDS`, the queryable names in declaration order
/// 3. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use casper::{ListQuery, PredicateProgram, Record};
///
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     age: u32,
///
///     #[record(rename = "nick")]
///     nickname: Option<String>,
///
///     #[record(skip)]
///     password_hash: Vec<u8>,
/// }
///
/// let people = vec![
///     Person { name: "John".into(), age: 30, nickname: None, password_hash: vec![] },
///     Person { name: "Jane".into(), age: 25, nickname: Some("JJ".into()), password_hash: vec![] },
/// ];
///
/// let program = PredicateProgram::new()
///     .where_(Person::AGE).lt(28)
///     .and_where(Person::NICK).is_not_null();
///
/// let found = ListQuery::new(&program).filter(&people).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "Jane");
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
