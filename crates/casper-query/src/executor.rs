//! List query execution.

use std::ops::Deref;

use tracing::{debug, trace, warn};

use crate::error::{QueryError, Result};
use crate::program::PredicateProgram;
use crate::resolver::{FieldResolver, Fields, Record};

/// Runs a [`PredicateProgram`] over an ordered sequence of records.
///
/// Each record gets a fresh evaluation session. Matches are returned in
/// iteration order, and the scan stops as soon as the program limit is
/// reached. The source is never mutated.
///
/// # Example
///
/// ```
/// use casper_query::{FieldValue, ListQuery, PredicateProgram, Record, Value};
///
/// struct Person { name: String, age: u32 }
///
/// impl Record for Person {
///     fn field_value(&self, field: &str) -> Option<Value<'_>> {
///         match field {
///             "name" => Some(self.name.field_value()),
///             "age" => Some(self.age.field_value()),
///             _ => None,
///         }
///     }
/// }
///
/// let people: Vec<Person> = (0..10)
///     .map(|i| Person { name: format!("Name{i}"), age: 20 + i })
///     .collect();
///
/// let program = PredicateProgram::new()
///     .where_("name").like("Name%")
///     .and_where("age").gt(25)
///     .limit(2);
///
/// let found = ListQuery::new(&program).filter(&people).unwrap();
/// let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Name6", "Name7"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'p> {
    program: &'p PredicateProgram,
}

impl<'p> ListQuery<'p> {
    /// Creates an executor for `program`.
    pub fn new(program: &'p PredicateProgram) -> Self {
        ListQuery { program }
    }

    /// Returns the program this executor runs.
    pub fn program(&self) -> &'p PredicateProgram {
        self.program
    }

    /// Evaluates every record and collects the matches.
    ///
    /// Items may be anything that dereferences to a record (`&T`, `Arc<T>`,
    /// `Box<T>`); matching items are returned as-is. A failing record aborts
    /// the scan with [`QueryError::Record`] and no partial results.
    pub fn execute<I, R>(&self, records: I, resolver: &R) -> Result<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Deref,
        R: FieldResolver<<I::Item as Deref>::Target>,
    {
        self.scan(records, resolver, self.program.get_limit())
    }

    /// Returns the first match, if any, stopping the scan there.
    pub fn first_with<I, R>(&self, records: I, resolver: &R) -> Result<Option<I::Item>>
    where
        I: IntoIterator,
        I::Item: Deref,
        R: FieldResolver<<I::Item as Deref>::Target>,
    {
        Ok(self.scan(records, resolver, Some(1))?.into_iter().next())
    }

    /// Filters a slice of [`Record`]s.
    pub fn filter<'t, T: Record>(&self, records: &'t [T]) -> Result<Vec<&'t T>> {
        self.execute(records, &Fields)
    }

    /// Returns the first matching [`Record`] in the slice.
    pub fn first<'t, T: Record>(&self, records: &'t [T]) -> Result<Option<&'t T>> {
        self.first_with(records, &Fields)
    }

    /// Counts matching [`Record`]s, honoring the program limit.
    pub fn count<T: Record>(&self, records: &[T]) -> Result<usize> {
        Ok(self.filter(records)?.len())
    }

    fn scan<I, R>(&self, records: I, resolver: &R, limit: Option<usize>) -> Result<Vec<I::Item>>
    where
        I: IntoIterator,
        I::Item: Deref,
        R: FieldResolver<<I::Item as Deref>::Target>,
    {
        let collection = self.program.collection().unwrap_or("-");
        let mut matched = Vec::new();
        let mut scanned = 0usize;

        for (position, item) in records.into_iter().enumerate() {
            scanned += 1;
            let hit = self.program.matches(&*item, resolver).map_err(|source| {
                warn!(collection, position, error = %source, "scan aborted");
                QueryError::Record {
                    position,
                    source: Box::new(source),
                }
            })?;
            trace!(collection, position, hit, "evaluated record");

            if hit {
                matched.push(item);
                if limit.is_some_and(|n| matched.len() >= n) {
                    break;
                }
            }
        }

        debug!(
            collection,
            scanned,
            matched = matched.len(),
            limit = ?limit,
            "scan complete"
        );
        Ok(matched)
    }
}
