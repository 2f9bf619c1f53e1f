//! Runtime value types for field comparison.
//!
//! The [`Value`] enum is what a [`FieldResolver`](crate::FieldResolver) hands
//! back for a named field: a borrowed view of the record's current state.

use std::cmp::Ordering;
use std::fmt;

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use casper_query::{Number, Value};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// fn resolve<'a>(person: &'a Person, field: &str) -> Option<Value<'a>> {
///     match field {
///         "name" => Some(Value::String(&person.name)),
///         "age" => Some(Value::Number(Number::U64(person.age as u64))),
///         _ => None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Field is present but holds no value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Single character.
    Char(char),
    /// String value (borrowed).
    String(&'a str),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the runtime kind, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Char(_) => "char",
            Value::String(_) => "string",
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::String(s) => write!(f, "'{s}'"),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their representation so they display faithfully, but every
/// comparison goes through `f64`: ordering is by numeric value, not by
/// representation.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers by their double-precision value.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        self.to_f64().partial_cmp(&other.to_f64())
    }

    /// Returns the value as a non-negative integer, if it is one.
    pub fn as_count(self) -> Option<usize> {
        match self {
            Number::I64(n) => usize::try_from(n).ok(),
            Number::U64(n) => usize::try_from(n).ok(),
            Number::F64(n) if n >= 0.0 && n.fract() == 0.0 && n <= usize::MAX as f64 => {
                Some(n as usize)
            }
            Number::F64(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kinds() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(true).kind(), "bool");
        assert_eq!(Value::Number(Number::I64(1)).kind(), "number");
        assert_eq!(Value::Char('a').kind(), "char");
        assert_eq!(Value::String("x").kind(), "string");
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::I64(42)).as_number(),
            Some(Number::I64(42))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(Number::I64(1)).as_str(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn numbers_compare_by_value_not_representation() {
        assert_eq!(Number::I64(5), Number::F64(5.0));
        assert_eq!(Number::U64(7), Number::I64(7));
        assert_eq!(
            Number::I64(-1).compare(Number::U64(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::F64(2.5).compare(Number::I64(2)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_ne!(Number::F64(f64::NAN), Number::F64(f64::NAN));
    }

    #[test]
    fn number_as_count() {
        assert_eq!(Number::I64(3).as_count(), Some(3));
        assert_eq!(Number::U64(0).as_count(), Some(0));
        assert_eq!(Number::F64(2.0).as_count(), Some(2));
        assert_eq!(Number::I64(-1).as_count(), None);
        assert_eq!(Number::F64(1.5).as_count(), None);
    }

    #[test]
    fn number_conversions() {
        assert!(matches!(Number::from(42i32), Number::I64(42)));
        assert!(matches!(Number::from(42u8), Number::U64(42)));
        assert!(matches!(Number::from(1.5f32), Number::F64(_)));
    }

    #[test]
    fn display() {
        assert_eq!(Value::String("Bob").to_string(), "'Bob'");
        assert_eq!(Value::Number(Number::I64(30)).to_string(), "30");
        assert_eq!(Value::Char('m').to_string(), "'m'");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
