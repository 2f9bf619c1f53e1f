//! Typed comparison of field values against operands.
//!
//! This is the value comparator behind every comparison step. It decides
//! whether two runtime values are comparable under a [`Mode`] and, if so,
//! what the verdict is.

use std::cmp::Ordering;

use crate::error::{QueryError, Result};
use crate::mode::Mode;
use crate::operand::{Operand, Truth};
use crate::value::{Number, Value};

/// Three-way comparison of a field value with a scalar operand.
///
/// Both sides must be of the same runtime kind. Numbers compare by their
/// `f64` value; strings, chars and bools by their natural order. Returns
/// `Ok(None)` when the comparison is undefined (NaN, or a null on either
/// side), which every ordering mode treats as not-matching.
pub fn compare(field: &str, value: &Value<'_>, operand: &Operand) -> Result<Option<Ordering>> {
    let ordering = match (value, operand) {
        (Value::Null, _) | (_, Operand::Null) => None,
        (Value::Number(a), Operand::Number(b)) => a.compare(*b),
        (Value::String(a), Operand::String(b)) => Some((*a).cmp(b.as_str())),
        (Value::Char(a), Operand::Char(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Operand::Bool(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(field, Mode::Exact, value, operand)),
    };
    Ok(ordering)
}

/// Tests a field value against an operand under the given mode.
///
/// `field` is only used to describe failures.
pub fn matches(field: &str, value: &Value<'_>, operand: &Operand, mode: Mode) -> Result<bool> {
    match mode {
        Mode::Exact => match (value, operand) {
            (Value::Null, Operand::Null) => Ok(true),
            (Value::Null, _) | (_, Operand::Null) => Ok(false),
            _ => Ok(compare(field, value, operand)
                .map_err(|_| mismatch(field, mode, value, operand))?
                == Some(Ordering::Equal)),
        },
        Mode::LessThan | Mode::GreaterThan | Mode::LessThanEqual | Mode::GreaterThanEqual => {
            let ordering =
                compare(field, value, operand).map_err(|_| mismatch(field, mode, value, operand))?;
            Ok(ordering.is_some_and(|o| mode.eval_ordering(o)))
        }
        Mode::Pattern => match (value, operand) {
            (Value::Null, _) => Ok(false),
            (Value::String(s), Operand::Pattern(p)) => p.is_match(s),
            _ => Err(mismatch(field, mode, value, operand)),
        },
        Mode::In => match operand {
            Operand::List(items) => Ok(items.iter().any(|item| equals(value, item))),
            _ => Err(mismatch(field, mode, value, operand)),
        },
        Mode::Between => match (value, operand) {
            (Value::Null, Operand::Range { .. }) => Ok(false),
            (Value::Number(n), Operand::Range { start, end }) => Ok(between(*n, *start, *end)),
            _ => Err(mismatch(field, mode, value, operand)),
        },
        Mode::Truth => match operand {
            Operand::Truth(truth) => Ok(is(value, *truth)),
            _ => Err(mismatch(field, mode, value, operand)),
        },
    }
}

/// Value equality used by membership tests.
///
/// Values of different kinds are never equal; numbers compare numerically.
pub fn equals(value: &Value<'_>, operand: &Operand) -> bool {
    match (value, operand) {
        (Value::Null, Operand::Null) => true,
        (Value::Bool(a), Operand::Bool(b)) => a == b,
        (Value::Number(a), Operand::Number(b)) => a == b,
        (Value::Char(a), Operand::Char(b)) => a == b,
        (Value::String(a), Operand::String(b)) => *a == b.as_str(),
        _ => false,
    }
}

/// Inclusive interval test. Bounds may be given in either order.
pub fn between(value: Number, start: Number, end: Number) -> bool {
    let (v, a, b) = (value.to_f64(), start.to_f64(), end.to_f64());
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    low <= v && v <= high
}

/// Tri-state truth test.
///
/// `Unknown` matches only null. A null never matches `True` or `False`.
pub fn is(value: &Value<'_>, truth: Truth) -> bool {
    match (truth, truthiness(value)) {
        (Truth::Unknown, None) => true,
        (Truth::True, Some(t)) => t,
        (Truth::False, Some(t)) => !t,
        _ => false,
    }
}

/// Truthiness of a present value; `None` for null.
fn truthiness(value: &Value<'_>) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.to_f64() > 0.0),
        Value::Char(c) => Some(!c.is_whitespace()),
        Value::String(s) => Some(!s.trim().is_empty()),
    }
}

fn mismatch(field: &str, mode: Mode, value: &Value<'_>, operand: &Operand) -> QueryError {
    QueryError::TypeMismatch {
        field: field.to_string(),
        mode,
        expected: operand.kind(),
        actual: value.kind(),
    }
}
