//! The named-collection registry.

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use casper_query::{FieldResolver, Fields, ListQuery, PredicateProgram, Record};
use tracing::debug;

use crate::collection::Collection;
use crate::config::{DatabaseConfig, ScanConsistency};
use crate::error::{Error, Result};
use crate::repository::Repository;

/// Type-erased view of a registered collection.
trait AnyCollection: Send + Sync {
    fn count(&self) -> usize;
    fn record_type(&self) -> &'static str;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Send + Sync + 'static> AnyCollection for Collection<T> {
    fn count(&self) -> usize {
        Collection::count(self)
    }

    fn record_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// An in-memory database: a registry of named, typed collections.
///
/// `Database` is a plain value with interior locking; share it with [`Arc`].
///
/// # Example
///
/// ```
/// use casper::{Database, FieldValue, PredicateProgram, Record, Value};
///
/// #[derive(PartialEq)]
/// struct Cat { name: String, lives: u8 }
///
/// impl Record for Cat {
///     fn field_value(&self, field: &str) -> Option<Value<'_>> {
///         match field {
///             "name" => Some(self.name.field_value()),
///             "lives" => Some(self.lives.field_value()),
///             _ => None,
///         }
///     }
/// }
///
/// let db = Database::new();
/// db.create_collection::<Cat>("cats").unwrap();
/// db.save("cats", Cat { name: "frank".into(), lives: 9 }).unwrap();
/// db.save("cats", Cat { name: "herbert".into(), lives: 3 }).unwrap();
///
/// let program = PredicateProgram::on("cats").where_("lives").lt(5);
/// let found = db.find::<Cat>(&program).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "herbert");
/// ```
pub struct Database {
    config: DatabaseConfig,
    collections: RwLock<HashMap<String, Arc<dyn AnyCollection>>>,
}

impl Database {
    /// Creates an empty database with the default configuration.
    pub fn new() -> Self {
        Database::with_config(DatabaseConfig::default())
    }

    /// Creates an empty database with `config`.
    pub fn with_config(config: DatabaseConfig) -> Self {
        Database {
            config,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Creates the collection if it does not exist yet and returns it.
    ///
    /// Fails with [`Error::CollectionTypeMismatch`] if a collection of
    /// another record type is already registered under `name`.
    pub fn create_collection<T>(&self, name: &str) -> Result<Arc<Collection<T>>>
    where
        T: Send + Sync + 'static,
    {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = collections.get(name) {
            return downcast(name, existing);
        }

        let collection = Arc::new(Collection::<T>::new(name));
        collections.insert(name.to_string(), collection.clone());
        debug!(collection = name, record = type_name::<T>(), "collection created");
        Ok(collection)
    }

    /// Returns the collection registered under `name`.
    pub fn collection<T>(&self, name: &str) -> Result<Arc<Collection<T>>>
    where
        T: Send + Sync + 'static,
    {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = collections
            .get(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        downcast(name, entry)
    }

    /// Returns `true` if a collection named `name` exists.
    pub fn has_collection(&self, name: &str) -> bool {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all registered collections, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Removes the collection and all its records. Returns whether it existed.
    ///
    /// Handles obtained earlier keep working on the detached collection.
    pub fn drop_collection(&self, name: &str) -> bool {
        let removed = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        if removed {
            debug!(collection = name, "collection dropped");
        }
        removed
    }

    /// Returns a typed repository over the named collection.
    ///
    /// With `create_missing` enabled (the default) the collection is created
    /// on demand.
    pub fn repository<T>(self: &Arc<Self>, name: &str) -> Result<Repository<T>>
    where
        T: Send + Sync + 'static,
    {
        Repository::open(Arc::clone(self), name)
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Inserts `record`, replacing an equal record in place.
    pub fn save<T>(&self, name: &str, record: T) -> Result<Arc<T>>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Ok(self.collection::<T>(name)?.add(record))
    }

    /// Removes the first record equal to `record`. Returns whether one was found.
    pub fn remove<T>(&self, name: &str, record: &T) -> Result<bool>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Ok(self.collection::<T>(name)?.remove(record))
    }

    /// Removes every record equal to any of `records`. Returns how many were
    /// removed.
    pub fn remove_all<T>(&self, name: &str, records: &[T]) -> Result<usize>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Ok(self.collection::<T>(name)?.remove_all(records))
    }

    /// Alias of [`remove`](Self::remove).
    pub fn delete<T>(&self, name: &str, record: &T) -> Result<bool>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        self.remove(name, record)
    }

    /// Alias of [`remove_all`](Self::remove_all).
    pub fn delete_all<T>(&self, name: &str, records: &[T]) -> Result<usize>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        self.remove_all(name, records)
    }

    /// Number of records in the collection.
    pub fn count(&self, name: &str) -> Result<usize> {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|c| c.count())
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// All records, in collection order.
    pub fn find_all<T>(&self, name: &str) -> Result<Vec<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        Ok(self.collection::<T>(name)?.snapshot())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Runs `program` against the collection it targets.
    ///
    /// Fails with [`Error::InvalidQuerySyntax`] if the program names no
    /// collection.
    pub fn find<T>(&self, program: &PredicateProgram) -> Result<Vec<Arc<T>>>
    where
        T: Record + Send + Sync + 'static,
    {
        self.find_with(program, &Fields)
    }

    /// Runs `program` and returns its first match.
    pub fn find_one<T>(&self, program: &PredicateProgram) -> Result<Option<Arc<T>>>
    where
        T: Record + Send + Sync + 'static,
    {
        self.find_one_with(program, &Fields)
    }

    /// Like [`find`](Self::find), resolving fields through `resolver`.
    pub fn find_with<T, R>(&self, program: &PredicateProgram, resolver: &R) -> Result<Vec<Arc<T>>>
    where
        T: Send + Sync + 'static,
        R: FieldResolver<T>,
    {
        let name = program
            .collection()
            .ok_or_else(|| Error::syntax("program has no target collection"))?;
        let collection = self.collection::<T>(name)?;
        let query = ListQuery::new(program);

        let found = match self.config.scan {
            ScanConsistency::Weak => query.execute(collection.cursor(), resolver)?,
            ScanConsistency::Snapshot => query.execute(collection.snapshot(), resolver)?,
        };
        Ok(found)
    }

    /// Like [`find_one`](Self::find_one), resolving fields through `resolver`.
    pub fn find_one_with<T, R>(
        &self,
        program: &PredicateProgram,
        resolver: &R,
    ) -> Result<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
        R: FieldResolver<T>,
    {
        let program = program.clone().limit(1);
        Ok(self.find_with(&program, resolver)?.into_iter().next())
    }
}

impl Default for Database {
    fn default() -> Self {
        Database::new()
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("config", &self.config)
            .field("collections", &self.collection_names())
            .finish()
    }
}

fn downcast<T>(name: &str, entry: &Arc<dyn AnyCollection>) -> Result<Arc<Collection<T>>>
where
    T: Send + Sync + 'static,
{
    let actual = entry.record_type();
    Arc::clone(entry)
        .into_any()
        .downcast::<Collection<T>>()
        .map_err(|_| Error::CollectionTypeMismatch {
            name: name.to_string(),
            requested: type_name::<T>(),
            actual,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use casper_query::{FieldValue, Value};

    #[derive(Debug, PartialEq)]
    struct Cat {
        name: String,
    }

    impl Record for Cat {
        fn field_value(&self, field: &str) -> Option<Value<'_>> {
            match field {
                "name" => Some(self.name.field_value()),
                _ => None,
            }
        }
    }

    fn cat(name: &str) -> Cat {
        Cat {
            name: name.to_string(),
        }
    }

    fn db() -> Database {
        let db = Database::new();
        db.create_collection::<Cat>("cats").unwrap();
        db
    }

    #[test]
    fn create_is_idempotent() {
        let db = db();
        db.save("cats", cat("frank")).unwrap();
        let again = db.create_collection::<Cat>("cats").unwrap();
        assert_eq!(again.count(), 1);
    }

    #[test]
    fn get_and_drop() {
        let db = db();
        db.create_collection::<Cat>("dogs").unwrap();
        assert!(db.collection::<Cat>("dogs").is_ok());
        assert_eq!(db.collection_names(), ["cats", "dogs"]);

        assert!(db.drop_collection("cats"));
        assert!(!db.drop_collection("cats"));
        assert!(matches!(
            db.collection::<Cat>("cats"),
            Err(Error::CollectionNotFound(_))
        ));
    }

    #[test]
    fn wrong_record_type() {
        let db = db();
        let err = db.collection::<String>("cats").unwrap_err();
        assert!(matches!(err, Error::CollectionTypeMismatch { .. }));
        assert!(db.create_collection::<u32>("cats").is_err());
    }

    #[test]
    fn save_replaces_equal_records() {
        let db = db();
        db.save("cats", cat("frank")).unwrap();
        db.save("cats", cat("frank")).unwrap();
        assert_eq!(db.count("cats").unwrap(), 1);
        db.save("cats", cat("herbert")).unwrap();
        assert_eq!(db.count("cats").unwrap(), 2);
    }

    #[test]
    fn remove_and_delete() {
        let db = db();
        db.save("cats", cat("frank")).unwrap();
        db.save("cats", cat("herbert")).unwrap();

        assert!(db.remove("cats", &cat("frank")).unwrap());
        assert_eq!(db.count("cats").unwrap(), 1);
        assert!(db.delete("cats", &cat("herbert")).unwrap());
        assert_eq!(db.count("cats").unwrap(), 0);
    }

    #[test]
    fn missing_collection_is_not_empty_collection() {
        let db = db();
        assert_eq!(db.count("cats").unwrap(), 0);
        assert!(matches!(
            db.count("birds"),
            Err(Error::CollectionNotFound(_))
        ));
        assert!(db.save("birds", cat("tweety")).is_err());
    }

    #[test]
    fn find_requires_target() {
        let db = db();
        let err = db
            .find::<Cat>(&PredicateProgram::new().where_("name").eq("x"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuerySyntax(_)));
    }

    #[test]
    fn find_one_returns_first_match() {
        let db = db();
        for name in ["anna", "bob", "abby"] {
            db.save("cats", cat(name)).unwrap();
        }
        let program = PredicateProgram::on("cats").where_("name").like("a%");
        let found = db.find_one::<Cat>(&program).unwrap();
        assert_eq!(found.map(|c| c.name.clone()), Some("anna".to_string()));

        // The caller's program is left untouched.
        assert_eq!(program.get_limit(), None);
        assert_eq!(db.find::<Cat>(&program).unwrap().len(), 2);
    }

    #[test]
    fn find_one_absent() {
        let db = db();
        let program = PredicateProgram::on("cats").where_("name").eq("nobody");
        assert!(db.find_one::<Cat>(&program).unwrap().is_none());
    }
}
