//! Comparison modes.
//!
//! A [`Mode`] tells the comparator how a field value is tested against an
//! operand. Every comparison command maps to exactly one mode.

use std::cmp::Ordering;
use std::fmt;

/// Comparison mode for the value comparator.
///
/// Modes are grouped by how they evaluate:
/// - **Ordering**: `Exact`, `LessThan`, `GreaterThan`, `LessThanEqual`,
///   `GreaterThanEqual` - three-way compare, same runtime kind required
/// - **Pattern**: glob match against a string field
/// - **Membership**: `In` - the operand list is exempt from the kind check
/// - **Range**: `Between` - inclusive bounds, in either order
/// - **Truth**: tri-state `is` test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Equal (value equality).
    Exact,
    /// Less than.
    LessThan,
    /// Greater than.
    GreaterThan,
    /// Less than or equal.
    LessThanEqual,
    /// Greater than or equal.
    GreaterThanEqual,
    /// Glob pattern match.
    Pattern,
    /// Membership in a list.
    In,
    /// Inclusive range.
    Between,
    /// Tri-state truthiness.
    Truth,
}

impl Mode {
    /// Returns `true` if this mode is decided by a three-way comparison.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Mode::Exact
                | Mode::LessThan
                | Mode::GreaterThan
                | Mode::LessThanEqual
                | Mode::GreaterThanEqual
        )
    }

    /// Evaluates the mode given an ordering result.
    ///
    /// Only meaningful for ordering modes; other modes yield `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Mode::Exact => ordering == Ordering::Equal,
            Mode::LessThan => ordering == Ordering::Less,
            Mode::GreaterThan => ordering == Ordering::Greater,
            Mode::LessThanEqual => ordering != Ordering::Greater,
            Mode::GreaterThanEqual => ordering != Ordering::Less,
            _ => false,
        }
    }

    /// Returns the operator token used when rendering a program.
    pub fn token(self) -> &'static str {
        match self {
            Mode::Exact => "=",
            Mode::LessThan => "<",
            Mode::GreaterThan => ">",
            Mode::LessThanEqual => "<=",
            Mode::GreaterThanEqual => ">=",
            Mode::Pattern => "like",
            Mode::In => "in",
            Mode::Between => "<>",
            Mode::Truth => "is",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_modes() {
        assert!(Mode::Exact.is_ordering());
        assert!(Mode::GreaterThanEqual.is_ordering());
        assert!(!Mode::Pattern.is_ordering());
        assert!(!Mode::In.is_ordering());
        assert!(!Mode::Between.is_ordering());
        assert!(!Mode::Truth.is_ordering());
    }

    #[test]
    fn eval_ordering() {
        assert!(Mode::Exact.eval_ordering(Ordering::Equal));
        assert!(!Mode::Exact.eval_ordering(Ordering::Less));

        assert!(Mode::LessThan.eval_ordering(Ordering::Less));
        assert!(!Mode::LessThan.eval_ordering(Ordering::Equal));

        assert!(Mode::GreaterThan.eval_ordering(Ordering::Greater));
        assert!(!Mode::GreaterThan.eval_ordering(Ordering::Equal));

        assert!(Mode::LessThanEqual.eval_ordering(Ordering::Equal));
        assert!(Mode::LessThanEqual.eval_ordering(Ordering::Less));
        assert!(!Mode::LessThanEqual.eval_ordering(Ordering::Greater));

        assert!(Mode::GreaterThanEqual.eval_ordering(Ordering::Equal));
        assert!(Mode::GreaterThanEqual.eval_ordering(Ordering::Greater));
        assert!(!Mode::GreaterThanEqual.eval_ordering(Ordering::Less));

        assert!(!Mode::In.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn tokens() {
        assert_eq!(Mode::Exact.to_string(), "=");
        assert_eq!(Mode::LessThanEqual.to_string(), "<=");
        assert_eq!(Mode::Between.to_string(), "<>");
        assert_eq!(Mode::Pattern.to_string(), "like");
    }
}
