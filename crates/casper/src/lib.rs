//! Casper - an embedded, in-memory object store.
//!
//! Records live in named, typed [`Collection`]s inside a [`Database`]. They
//! are retrieved by running a [`PredicateProgram`] (a flat, SQL-like list of
//! comparisons joined by short-circuiting `and`/`or`/`not`) over a
//! collection.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use casper::{Database, PredicateProgram, Record};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Person {
//!     name: String,
//!     age: u32,
//!     job: String,
//! }
//!
//! let db = Arc::new(Database::new());
//! let people = db.repository::<Person>("people").unwrap();
//!
//! for i in 0..10 {
//!     people
//!         .save(Person { name: format!("Name{i}"), age: 20 + i, job: "Digging".into() })
//!         .unwrap();
//! }
//!
//! // Builder API
//! let program = PredicateProgram::on("people")
//!     .where_(Person::NAME).like("Name%")
//!     .and_where(Person::AGE).gt(25)
//!     .limit(2);
//! let found = db.find::<Person>(&program).unwrap();
//! let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Name6", "Name7"]);
//!
//! // Finder names
//! let diggers = people.call("findByJob", &["Digging".into()]).unwrap();
//! assert_eq!(diggers.len(), 10);
//! ```
//!
//! # Crates
//!
//! - `casper-query` - the predicate engine, re-exported here
//! - `casper-macros` - `#[derive(Record)]`, re-exported with the `macros`
//!   feature (on by default)
//!
//! # Configuration
//!
//! [`DatabaseConfig`] is loaded from YAML and controls scan consistency and
//! whether repositories create their collections on demand.
//!
//! # Logging
//!
//! The store and engine emit [`tracing`](https://docs.rs/tracing) events:
//! collection lifecycle and scan summaries at `debug`, per-record verdicts at
//! `trace`, aborted scans at `warn`. No subscriber is installed.

// Lets `#[derive(Record)]` resolve `::casper` inside this crate.
extern crate self as casper;

mod collection;
mod config;
mod database;
mod error;
pub mod method;
mod repository;

pub use collection::{Collection, Cursor};
pub use config::{DatabaseConfig, ScanConsistency};
pub use database::Database;
pub use error::{Error, Result};
pub use repository::{Found, Repository};

// Re-export the engine
pub use casper_query::{
    Command, Evaluator, FieldResolver, FieldValue, Fields, GlobPattern, ListQuery, Mode, Number,
    Operand, PredicateProgram, PredicateStep, QueryError, Record, Schema, SessionState, Truth,
    Value,
};

#[cfg(feature = "macros")]
pub use casper_macros::Record;
