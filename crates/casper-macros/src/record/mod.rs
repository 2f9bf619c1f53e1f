//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the field-name to value mapping that lets the query engine
//! resolve fields by name, plus field name constants.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
