//! Predicate steps: the instructions of a predicate program.

use crate::mode::Mode;
use crate::operand::Operand;

/// Instruction kind of a [`PredicateStep`].
///
/// `*Field` variants name their field explicitly; the plain variants apply to
/// the evaluator's current field, bound by the most recent `WhereField`,
/// `AndField` or `OrField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Connectives
    And,
    AndField,
    Or,
    OrField,
    Not,

    // Field binding
    Where,
    WhereField,

    // Comparisons
    Eq,
    EqField,
    Ne,
    NeField,
    Lt,
    LtField,
    Gt,
    GtField,
    Le,
    LeField,
    Ge,
    GeField,
    Like,
    LikeField,
    In,
    InField,
    Between,
    BetweenField,
    Is,
    IsField,
    IsNot,
    IsNotField,

    // Control
    Limit,
}

impl Command {
    /// Returns `true` if this command must carry a field name.
    pub fn takes_field(self) -> bool {
        matches!(
            self,
            Command::AndField
                | Command::OrField
                | Command::WhereField
                | Command::EqField
                | Command::NeField
                | Command::LtField
                | Command::GtField
                | Command::LeField
                | Command::GeField
                | Command::LikeField
                | Command::InField
                | Command::BetweenField
                | Command::IsField
                | Command::IsNotField
        )
    }

    /// Returns `true` if this command compares a field against an operand.
    pub fn is_comparison(self) -> bool {
        self.mode().is_some()
    }

    /// Returns the comparison mode, or `None` for connectives and control.
    pub fn mode(self) -> Option<Mode> {
        let mode = match self {
            Command::Eq | Command::EqField | Command::Ne | Command::NeField => Mode::Exact,
            Command::Lt | Command::LtField => Mode::LessThan,
            Command::Gt | Command::GtField => Mode::GreaterThan,
            Command::Le | Command::LeField => Mode::LessThanEqual,
            Command::Ge | Command::GeField => Mode::GreaterThanEqual,
            Command::Like | Command::LikeField => Mode::Pattern,
            Command::In | Command::InField => Mode::In,
            Command::Between | Command::BetweenField => Mode::Between,
            Command::Is | Command::IsField | Command::IsNot | Command::IsNotField => Mode::Truth,
            _ => return None,
        };
        Some(mode)
    }

    /// Returns `true` if the comparison verdict is inverted (`ne`, `is not`).
    pub fn inverts(self) -> bool {
        matches!(
            self,
            Command::Ne | Command::NeField | Command::IsNot | Command::IsNotField
        )
    }

    /// Returns the operator token used when rendering.
    pub fn token(self) -> &'static str {
        match self {
            Command::Ne | Command::NeField => "!=",
            Command::IsNot | Command::IsNotField => "is not",
            Command::And | Command::AndField => "and",
            Command::Or | Command::OrField => "or",
            Command::Not => "not",
            Command::Limit => "limit",
            Command::Where | Command::WhereField => "",
            other => other.mode().map_or("", Mode::token),
        }
    }
}

/// A single immutable instruction in a predicate program.
///
/// Constructed through [`PredicateStep::new`], [`PredicateStep::unary`] and
/// [`PredicateStep::with_field`], which keep the field name present exactly
/// when the command requires one.
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateStep {
    command: Command,
    field: Option<String>,
    operand: Option<Operand>,
}

impl PredicateStep {
    /// Creates a step with neither field nor operand (`and`, `or`, `not`,
    /// `where`).
    ///
    /// # Panics
    ///
    /// Panics if `command` requires a field name.
    pub fn new(command: Command) -> Self {
        assert!(!command.takes_field(), "{command:?} requires a field name");
        PredicateStep {
            command,
            field: None,
            operand: None,
        }
    }

    /// Creates a step that applies an operand to the current field (`eq`,
    /// `like`, `limit`, ...).
    ///
    /// # Panics
    ///
    /// Panics if `command` requires a field name.
    pub fn unary(command: Command, operand: impl Into<Operand>) -> Self {
        assert!(!command.takes_field(), "{command:?} requires a field name");
        PredicateStep {
            command,
            field: None,
            operand: Some(operand.into()),
        }
    }

    /// Creates a step that names its field (`where_field`, `eq_field`, ...).
    ///
    /// # Panics
    ///
    /// Panics if `command` does not take a field name.
    pub fn with_field(
        command: Command,
        field: impl Into<String>,
        operand: Option<Operand>,
    ) -> Self {
        assert!(command.takes_field(), "{command:?} does not take a field name");
        PredicateStep {
            command,
            field: Some(field.into()),
            operand,
        }
    }

    /// Returns the command.
    pub fn command(&self) -> Command {
        self.command
    }

    /// Returns the explicit field name, if the command carries one.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the operand, if any.
    pub fn operand(&self) -> Option<&Operand> {
        self.operand.as_ref()
    }
}
