//! Owned operand values stored in predicate steps.
//!
//! Unlike [`Value`](crate::Value), which borrows from a record, an
//! [`Operand`] owns its data so it can live inside a
//! [`PredicateProgram`](crate::PredicateProgram) and be replayed against any
//! number of records.

use std::fmt;

use crate::pattern::GlobPattern;
use crate::value::Number;

/// Tri-state truth value for `is` / `is not` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    /// Matches truthy values.
    True,
    /// Matches falsy (but present) values.
    False,
    /// Matches only null values.
    Unknown,
}

impl Truth {
    /// Returns the display name of this truth value.
    pub fn as_str(self) -> &'static str {
        match self {
            Truth::True => "true",
            Truth::False => "false",
            Truth::Unknown => "unknown",
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

impl From<Option<bool>> for Truth {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Truth::Unknown, Truth::from)
    }
}

/// Operand of a predicate step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Null literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal.
    Number(Number),
    /// Character literal.
    Char(char),
    /// String literal.
    String(String),
    /// Candidate set for `in`.
    List(Vec<Operand>),
    /// Inclusive bounds for `between`, in either order.
    Range {
        /// First bound as given by the caller.
        start: Number,
        /// Second bound as given by the caller.
        end: Number,
    },
    /// Glob pattern for `like`.
    Pattern(GlobPattern),
    /// Truth value for `is` / `is not`.
    Truth(Truth),
}

impl Operand {
    /// Builds a `between` range operand.
    pub fn range(start: impl Into<Number>, end: impl Into<Number>) -> Self {
        Operand::Range {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builds an `in` candidate list.
    pub fn list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        Operand::List(values.into_iter().map(Into::into).collect())
    }

    /// Builds a `like` pattern operand.
    pub fn pattern(source: impl Into<String>) -> Self {
        Operand::Pattern(GlobPattern::new(source))
    }

    /// Name of the runtime kind, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Null => "null",
            Operand::Bool(_) => "bool",
            Operand::Number(_) => "number",
            Operand::Char(_) => "char",
            Operand::String(_) => "string",
            Operand::List(_) => "list",
            Operand::Range { .. } => "range",
            Operand::Pattern(_) => "pattern",
            Operand::Truth(_) => "truth",
        }
    }

    /// Returns the number, if this is a numeric operand.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Null => write!(f, "null"),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Char(c) => write!(f, "'{c}'"),
            Operand::String(s) => write!(f, "'{s}'"),
            Operand::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Operand::Range { start, end } => write!(f, "[{start}, {end}]"),
            Operand::Pattern(p) => write!(f, "'{p}'"),
            Operand::Truth(t) => write!(f, "{}", t.as_str()),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::String(s.clone())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<char> for Operand {
    fn from(c: char) -> Self {
        Operand::Char(c)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<Truth> for Operand {
    fn from(t: Truth) -> Self {
        Operand::Truth(t)
    }
}

impl From<GlobPattern> for Operand {
    fn from(p: GlobPattern) -> Self {
        Operand::Pattern(p)
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        v.map_or(Operand::Null, Into::into)
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(v: Vec<T>) -> Self {
        Operand::list(v)
    }
}

impl<T: Into<Operand>, const N: usize> From<[T; N]> for Operand {
    fn from(v: [T; N]) -> Self {
        Operand::list(v)
    }
}

macro_rules! operand_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )*
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Operand::from("x"), Operand::String("x".into()));
        assert_eq!(Operand::from(3i32), Operand::Number(Number::I64(3)));
        assert_eq!(Operand::from('a'), Operand::Char('a'));
        assert_eq!(Operand::from(None::<i32>), Operand::Null);
        assert_eq!(
            Operand::from(vec![1, 2]),
            Operand::List(vec![Operand::from(1), Operand::from(2)])
        );
        assert_eq!(
            Operand::from(['a', 'b']),
            Operand::List(vec![Operand::Char('a'), Operand::Char('b')])
        );
    }

    #[test]
    fn truth_conversions() {
        assert_eq!(Truth::from(true), Truth::True);
        assert_eq!(Truth::from(false), Truth::False);
        assert_eq!(Truth::from(None::<bool>), Truth::Unknown);
    }

    #[test]
    fn display() {
        assert_eq!(Operand::from("Digging").to_string(), "'Digging'");
        assert_eq!(Operand::list([4, 6, 2]).to_string(), "(4, 6, 2)");
        assert_eq!(Operand::range(20, 30).to_string(), "[20, 30]");
        assert_eq!(Operand::pattern("Name%").to_string(), "'Name%'");
        assert_eq!(Operand::Truth(Truth::Unknown).to_string(), "unknown");
    }

    #[test]
    fn kinds() {
        assert_eq!(Operand::Null.kind(), "null");
        assert_eq!(Operand::list([1]).kind(), "list");
        assert_eq!(Operand::range(1, 2).kind(), "range");
        assert_eq!(Operand::pattern("%").kind(), "pattern");
    }
}
