//! Typed handles over a single collection.

use std::marker::PhantomData;
use std::sync::Arc;

use casper_query::{Operand, PredicateProgram, Record};

use crate::collection::Collection;
use crate::database::Database;
use crate::error::Result;
use crate::method::MethodQuery;

/// Result of a derived finder call.
#[derive(Debug, Clone, PartialEq)]
pub enum Found<T> {
    /// `findBy` / `findAllBy`: every match, in collection order.
    Many(Vec<Arc<T>>),
    /// `findOneBy`: the first match, if any.
    One(Option<Arc<T>>),
}

impl<T> Found<T> {
    /// All matches as a list.
    pub fn into_vec(self) -> Vec<Arc<T>> {
        match self {
            Found::Many(records) => records,
            Found::One(record) => record.into_iter().collect(),
        }
    }

    /// The first match, if any.
    pub fn into_first(self) -> Option<Arc<T>> {
        match self {
            Found::Many(records) => records.into_iter().next(),
            Found::One(record) => record,
        }
    }

    /// Number of records found.
    pub fn len(&self) -> usize {
        match self {
            Found::Many(records) => records.len(),
            Found::One(record) => usize::from(record.is_some()),
        }
    }

    /// Returns `true` if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A typed repository bound to one named collection.
///
/// Every call goes through the [`Database`], so dropping and recreating the
/// collection is observed by existing repositories.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use casper::{Database, FieldValue, Record, Value};
///
/// #[derive(PartialEq)]
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
/// let db = Arc::new(Database::new());
/// let people = db.repository::<Person>("people").unwrap();
/// people.save(Person { name: "John".into(), age: 30 }).unwrap();
/// people.save(Person { name: "Jane".into(), age: 25 }).unwrap();
///
/// let found = people.call("findByNameLike", &["J%".into()]).unwrap();
/// assert_eq!(found.len(), 2);
///
/// let jane = people.call("findOneByAge", &[25.into()]).unwrap().into_first();
/// assert_eq!(jane.map(|p| p.name.clone()), Some("Jane".to_string()));
/// ```
pub struct Repository<T> {
    database: Arc<Database>,
    name: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Repository<T>
where
    T: Send + Sync + 'static,
{
    /// Opens a repository over `name`, creating the collection if the
    /// database is configured to.
    pub fn open(database: Arc<Database>, name: &str) -> Result<Self> {
        if database.config().create_missing {
            database.create_collection::<T>(name)?;
        } else {
            database.collection::<T>(name)?;
        }
        Ok(Repository {
            database,
            name: name.to_string(),
            _record: PhantomData,
        })
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning database.
    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    /// The underlying collection.
    pub fn collection(&self) -> Result<Arc<Collection<T>>> {
        self.database.collection(&self.name)
    }

    /// Returns the number of records in the collection.
    pub fn count(&self) -> Result<usize> {
        self.database.count(&self.name)
    }

    /// Returns every record, in collection order.
    pub fn find_all(&self) -> Result<Vec<Arc<T>>> {
        self.database.find_all(&self.name)
    }

    /// A program targeting this repository's collection.
    pub fn query(&self) -> PredicateProgram {
        PredicateProgram::on(self.name.as_str())
    }
}

impl<T> Repository<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    /// Adds `record`, replacing an equal record in place.
    pub fn save(&self, record: T) -> Result<Arc<T>> {
        self.database.save(&self.name, record)
    }

    /// Removes the first record equal to `record`.
    pub fn remove(&self, record: &T) -> Result<bool> {
        self.database.remove(&self.name, record)
    }

    /// Removes every record equal to any of `records`.
    pub fn remove_all(&self, records: &[T]) -> Result<usize> {
        self.database.remove_all(&self.name, records)
    }

    /// Alias for [`remove`](Self::remove).
    pub fn delete(&self, record: &T) -> Result<bool> {
        self.database.delete(&self.name, record)
    }

    /// Alias for [`remove_all`](Self::remove_all).
    pub fn delete_all(&self, records: &[T]) -> Result<usize> {
        self.database.delete_all(&self.name, records)
    }
}

impl<T> Repository<T>
where
    T: Record + Send + Sync + 'static,
{
    /// Runs `program` against this collection, whatever collection it names.
    pub fn find(&self, program: &PredicateProgram) -> Result<Vec<Arc<T>>> {
        let program = program.clone().with_collection(self.name.as_str());
        self.database.find(&program)
    }

    /// Returns the first record matching `program`, if any.
    pub fn find_one(&self, program: &PredicateProgram) -> Result<Option<Arc<T>>> {
        let program = program.clone().with_collection(self.name.as_str());
        self.database.find_one(&program)
    }

    /// Derives a query from a finder name and runs it.
    ///
    /// See [`method`](crate::method) for the naming rules.
    pub fn call(&self, method: &str, args: &[Operand]) -> Result<Found<T>> {
        let query = MethodQuery::parse(&self.name, method)?;
        let program = query.bind(args)?;
        if query.is_single() {
            Ok(Found::One(self.database.find_one(&program)?))
        } else {
            Ok(Found::Many(self.database.find(&program)?))
        }
    }
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            database: Arc::clone(&self.database),
            name: self.name.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("record", &std::any::type_name::<T>())
            .finish()
    }
}
