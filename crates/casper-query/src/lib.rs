//! Casper query engine - predicate programs over in-memory records.
//!
//! A query is a [`PredicateProgram`]: a flat, replayable list of steps that
//! bind fields, compare them against operands and join the comparisons with
//! short-circuiting connectives. Programs are plain values; build one, then
//! run it over any ordered sequence of records with [`ListQuery`].
//!
//! # Quick Start
//!
//! ```rust
//! use casper_query::{FieldValue, ListQuery, PredicateProgram, Record, Value};
//!
//! struct Task {
//!     name: String,
//!     priority: i32,
//!     archived: bool,
//! }
//!
//! impl Record for Task {
//!     fn field_value(&self, field: &str) -> Option<Value<'_>> {
//!         match field {
//!             "name" => Some(self.name.field_value()),
//!             "priority" => Some(self.priority.field_value()),
//!             "archived" => Some(self.archived.field_value()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { name: "Write docs".into(), priority: 3, archived: false },
//!     Task { name: "Fix bug".into(), priority: 5, archived: false },
//!     Task { name: "Old task".into(), priority: 1, archived: true },
//! ];
//!
//! let program = PredicateProgram::on("tasks")
//!     .where_("priority").ge(3)
//!     .and_where("archived").is(false);
//!
//! let found = ListQuery::new(&program).filter(&tasks).unwrap();
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[1].name, "Fix bug");
//! ```
//!
//! # Evaluation Semantics
//!
//! Steps run strictly left to right, with no precedence and no grouping:
//!
//! ```text
//! where f      bind f as the current field
//! and          skip the next comparison unless the verdict is true
//! or           skip the next comparison if the verdict is already true
//! not          invert the next comparison
//! <cmp>        verdict = compare(field, operand), unless skipped
//! ```
//!
//! The record matches if the last comparison that actually ran was true.
//! A skipped comparison does not resolve its field at all.
//!
//! # Comparisons
//!
//! | Builder | Token | Operand |
//! |---------|-------|---------|
//! | `eq` / `ne` | `=` / `!=` | scalar, same kind as the field |
//! | `lt` `gt` `le` `ge` | `<` `>` `<=` `>=` | scalar, same kind as the field |
//! | `like` | `like` | glob: `%` wildcard, `\%` literal percent |
//! | `in_` | `in` | list of scalars |
//! | `between` | `<>` | inclusive numeric range, bounds in either order |
//! | `is` / `is_not` | `is` / `is not` | `true`, `false` or unknown (null) |
//!
//! Every comparison also has an explicit-field form (`field_eq`,
//! `field_like`, ...) that does not change the current field.

mod compare;
mod error;
mod evaluator;
mod executor;
mod mode;
mod operand;
mod pattern;
mod program;
mod render;
mod resolver;
mod step;
mod value;

// Re-export public API
pub use compare::{between, compare, equals, is, matches};
pub use error::{QueryError, Result};
pub use evaluator::{Evaluator, SessionState};
pub use executor::ListQuery;
pub use mode::Mode;
pub use operand::{Operand, Truth};
pub use pattern::GlobPattern;
pub use program::PredicateProgram;
pub use resolver::{Accessor, FieldResolver, FieldValue, Fields, Record, Schema};
pub use step::{Command, PredicateStep};
pub use value::{Number, Value};
