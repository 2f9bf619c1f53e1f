//! Collections: ordered, shared sequences of records of one type.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An ordered, mutable sequence of records of one type.
///
/// Records are stored behind [`Arc`] so scans can hand them out without
/// holding the collection lock. Identity is value equality: saving a record
/// equal to an existing one replaces it at the same position.
pub struct Collection<T> {
    name: String,
    records: RwLock<Vec<Arc<T>>>,
}

impl<T> Collection<T> {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Collection {
            name: name.into(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records.
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Arc<T>> {
        self.read().get(index).cloned()
    }

    /// Copies the current record list.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.read().clone()
    }

    /// Returns a weakly consistent cursor over the records.
    ///
    /// The cursor takes the read lock once per record. Records added or
    /// removed during the scan may or may not be observed, and a removal
    /// ahead of the cursor can shift a record past it.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            collection: self,
            position: 0,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<T>>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<T>>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: PartialEq> Collection<T> {
    /// Inserts `record`, replacing the first equal record in place.
    pub fn add(&self, record: T) -> Arc<T> {
        let record = Arc::new(record);
        let mut records = self.write();
        match records.iter().position(|r| **r == *record) {
            Some(index) => records[index] = Arc::clone(&record),
            None => records.push(Arc::clone(&record)),
        }
        record
    }

    /// Removes the first record equal to `record`. Returns whether one was found.
    pub fn remove(&self, record: &T) -> bool {
        let mut records = self.write();
        match records.iter().position(|r| **r == *record) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every record equal to any of `targets`. Returns how many were
    /// removed.
    pub fn remove_all(&self, targets: &[T]) -> usize {
        let mut records = self.write();
        let before = records.len();
        records.retain(|r| !targets.iter().any(|t| **r == *t));
        before - records.len()
    }

    /// Returns `true` if a record equal to `record` is stored.
    pub fn contains(&self, record: &T) -> bool {
        self.read().iter().any(|r| **r == *record)
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("count", &self.count())
            .finish()
    }
}

/// Weakly consistent iterator over a [`Collection`].
pub struct Cursor<'c, T> {
    collection: &'c Collection<T>,
    position: usize,
}

impl<T> Iterator for Cursor<'_, T> {
    type Item = Arc<T>;

    fn next(&mut self) -> Option<Arc<T>> {
        let record = self.collection.get(self.position)?;
        self.position += 1;
        Some(record)
    }
}
