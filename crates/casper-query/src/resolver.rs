//! Field resolution: looking up a named field's current value on a record.
//!
//! Records expose their fields through the [`Record`] trait, which is usually
//! generated by `#[derive(Record)]` from the `casper-macros` crate. Types that
//! cannot (or should not) implement it can register their accessors once in a
//! [`Schema`] instead. Both plug into the engine through [`FieldResolver`].

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;

use crate::error::{QueryError, Result};
use crate::value::{Number, Value};

/// Trait for types whose fields can be queried by name.
///
/// # Derive Usage
///
/// ```ignore
/// use casper::Record;
///
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     age: u32,
///     #[record(skip)]
///     secret: String,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use casper_query::{FieldValue, Record, Value};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
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
/// ```
pub trait Record {
    /// Returns the current value of a field, or `None` if the type has no
    /// field with that name.
    fn field_value(&self, field: &str) -> Option<Value<'_>>;
}

/// Conversion of a single field into a queryable [`Value`].
///
/// Implemented for strings, numbers, `bool`, `char`, and `Option` of any of
/// these (`None` becomes [`Value::Null`]).
pub trait FieldValue {
    /// Returns the field as a comparable value.
    fn field_value(&self) -> Value<'_>;
}

impl FieldValue for String {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for str {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for &str {
    fn field_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl FieldValue for bool {
    fn field_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl FieldValue for char {
    fn field_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.field_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldValue + ?Sized> FieldValue for Box<T> {
    fn field_value(&self) -> Value<'_> {
        (**self).field_value()
    }
}

macro_rules! field_value_number {
    ($($source:ty),*) => {
        $(
            impl FieldValue for $source {
                fn field_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

field_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Resolves named fields on records of type `T`.
pub trait FieldResolver<T: ?Sized> {
    /// Returns the current value of `field` on `record`.
    ///
    /// Fails with [`QueryError::FieldNotFound`] if `T` has no such field.
    fn resolve<'a>(&self, record: &'a T, field: &str) -> Result<Value<'a>>;
}

/// Resolver backed by the record's own [`Record`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields;

impl<T: Record + ?Sized> FieldResolver<T> for Fields {
    fn resolve<'a>(&self, record: &'a T, field: &str) -> Result<Value<'a>> {
        record
            .field_value(field)
            .ok_or_else(|| not_found::<T>(field))
    }
}

/// Accessor function registered in a [`Schema`].
pub type Accessor<T> = for<'a> fn(&'a T) -> Value<'a>;

/// A registered mapping from field name to accessor function.
///
/// Built once, when a record type is registered, and then shared by every
/// evaluation. Useful for types that do not implement [`Record`], or to
/// expose computed fields.
///
/// # Example
///
/// ```
/// use casper_query::{FieldResolver, FieldValue, Schema, Value};
///
/// struct Point { x: i32, y: i32 }
///
/// let schema = Schema::<Point>::new()
///     .field("x", |p| p.x.field_value())
///     .field("y", |p| p.y.field_value());
///
/// let p = Point { x: 3, y: 4 };
/// assert_eq!(schema.resolve(&p, "x").unwrap(), Value::Number(3.into()));
/// assert!(schema.resolve(&p, "z").is_err());
/// ```
pub struct Schema<T: ?Sized> {
    accessors: HashMap<String, Accessor<T>>,
}

impl<T: ?Sized> Schema<T> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Schema {
            accessors: HashMap::new(),
        }
    }

    /// Registers an accessor for `name`, replacing any previous one.
    pub fn field(mut self, name: impl Into<String>, accessor: Accessor<T>) -> Self {
        self.accessors.insert(name.into(), accessor);
        self
    }

    /// Returns `true` if a field with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    /// Returns the registered field names, in no particular order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }
}

impl<T: ?Sized> Default for Schema<T> {
    fn default() -> Self {
        Schema::new()
    }
}

impl<T: ?Sized> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.field_names().collect();
        names.sort_unstable();
        f.debug_struct("Schema")
            .field("record", &type_name::<T>())
            .field("fields", &names)
            .finish()
    }
}

impl<T: ?Sized> FieldResolver<T> for Schema<T> {
    fn resolve<'a>(&self, record: &'a T, field: &str) -> Result<Value<'a>> {
        let accessor = self
            .accessors
            .get(field)
            .ok_or_else(|| not_found::<T>(field))?;
        Ok(accessor(record))
    }
}

impl<T: ?Sized, R: FieldResolver<T> + ?Sized> FieldResolver<T> for &R {
    fn resolve<'a>(&self, record: &'a T, field: &str) -> Result<Value<'a>> {
        (**self).resolve(record, field)
    }
}

fn not_found<T: ?Sized>(field: &str) -> QueryError {
    QueryError::FieldNotFound {
        record: short_type_name::<T>(),
        field: field.to_string(),
    }
}

/// Type name without its module path.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestItem {
        name: String,
        count: i32,
        nickname: Option<String>,
    }

    impl Record for TestItem {
        fn field_value(&self, field: &str) -> Option<Value<'_>> {
            match field {
                "name" => Some(self.name.field_value()),
                "count" => Some(self.count.field_value()),
                "nickname" => Some(self.nickname.field_value()),
                _ => None,
            }
        }
    }

    fn item() -> TestItem {
        TestItem {
            name: "test".to_string(),
            count: 42,
            nickname: None,
        }
    }

    #[test]
    fn fields_resolver_uses_record_impl() {
        let item = item();
        assert_eq!(Fields.resolve(&item, "name").unwrap(), Value::String("test"));
        assert_eq!(
            Fields.resolve(&item, "count").unwrap(),
            Value::Number(Number::I64(42))
        );
        assert_eq!(Fields.resolve(&item, "nickname").unwrap(), Value::Null);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = Fields.resolve(&item(), "height").unwrap_err();
        match err {
            QueryError::FieldNotFound { record, field } => {
                assert_eq!(record, "TestItem");
                assert_eq!(field, "height");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn schema_resolves_registered_accessors() {
        let schema = Schema::<TestItem>::new()
            .field("name", |t| t.name.field_value())
            .field("double", |t| Value::Number(Number::I64(t.count as i64 * 2)));

        let item = item();
        assert_eq!(schema.resolve(&item, "name").unwrap(), Value::String("test"));
        assert_eq!(
            schema.resolve(&item, "double").unwrap(),
            Value::Number(Number::I64(84))
        );
        assert!(schema.contains("double"));
        assert!(matches!(
            schema.resolve(&item, "count"),
            Err(QueryError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn option_field_values() {
        assert_eq!(Some(3u8).field_value(), Value::Number(Number::U64(3)));
        assert_eq!(None::<bool>.field_value(), Value::Null);
        assert_eq!(Some('x').field_value(), Value::Char('x'));
    }

    #[test]
    fn short_type_names() {
        assert_eq!(short_type_name::<TestItem>(), "TestItem");
        assert_eq!(short_type_name::<str>(), "str");
    }
}
