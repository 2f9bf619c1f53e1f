//! Per-record evaluation of predicate programs.
//!
//! Evaluation is a left-to-right replay of the program's steps over a small
//! session state. There is no operator precedence and no grouping: `and` and
//! `or` only decide whether the *next* comparison runs at all.
//!
//! ```text
//! and   skip_next = !verdict
//! or    skip_next = verdict
//! not   negate    = true
//! cmp   if skip_next: clear skip_next and negate
//!       else verdict = compare(field, operand) ^ negate ^ inverts
//! ```
//!
//! A skipped comparison never resolves its field, so a misspelled field in a
//! short-circuited branch goes unnoticed.

use crate::compare;
use crate::error::{QueryError, Result};
use crate::mode::Mode;
use crate::operand::Operand;
use crate::program::PredicateProgram;
use crate::resolver::FieldResolver;
use crate::step::{Command, PredicateStep};

/// Transient state of one evaluation session.
///
/// Transitions are pure: [`SessionState::next`] consumes a state and a step
/// and returns the following state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState<'a> {
    verdict: bool,
    skip_next: bool,
    negate: bool,
    current_field: Option<&'a str>,
}

impl<'a> SessionState<'a> {
    /// Returns the verdict of the last executed comparison (`false` if none ran).
    pub fn verdict(&self) -> bool {
        self.verdict
    }

    /// Returns `true` if the next comparison will be skipped.
    pub fn skip_next(&self) -> bool {
        self.skip_next
    }

    /// Returns `true` if the next comparison will be inverted.
    pub fn negate(&self) -> bool {
        self.negate
    }

    /// Returns the field bound for unary comparisons.
    pub fn current_field(&self) -> Option<&'a str> {
        self.current_field
    }

    /// Applies one step.
    ///
    /// `compare` is called only for comparisons that actually run, with the
    /// effective field name, the operand and the comparison mode.
    pub fn next<F>(self, step: &'a PredicateStep, compare: F) -> Result<Self>
    where
        F: FnOnce(&'a str, &'a Operand, Mode) -> Result<bool>,
    {
        let command = step.command();
        let state = match command {
            Command::And => SessionState {
                skip_next: !self.verdict,
                ..self
            },
            Command::AndField => SessionState {
                skip_next: !self.verdict,
                current_field: step.field(),
                ..self
            },
            Command::Or => SessionState {
                skip_next: self.verdict,
                ..self
            },
            Command::OrField => SessionState {
                skip_next: self.verdict,
                current_field: step.field(),
                ..self
            },
            Command::Not => SessionState {
                negate: true,
                ..self
            },
            Command::WhereField => SessionState {
                current_field: step.field(),
                ..self
            },
            Command::Where | Command::Limit => self,
            _ => {
                let Some(mode) = command.mode() else {
                    return Ok(self);
                };
                if self.skip_next {
                    return Ok(SessionState {
                        skip_next: false,
                        negate: false,
                        ..self
                    });
                }

                let field = step
                    .field()
                    .or(self.current_field)
                    .ok_or(QueryError::NoFieldBound { command })?;
                let operand = step.operand().ok_or_else(|| QueryError::MissingOperand {
                    command,
                    field: field.to_string(),
                })?;

                let verdict = compare(field, operand, mode)? ^ self.negate ^ command.inverts();
                SessionState {
                    verdict,
                    negate: false,
                    ..self
                }
            }
        };
        Ok(state)
    }
}

/// Evaluates predicate steps against a single record.
///
/// An evaluator is created per record and discarded afterwards; it holds no
/// state that outlives the record's evaluation.
pub struct Evaluator<'a, T: ?Sized, R> {
    record: &'a T,
    resolver: &'a R,
    state: SessionState<'a>,
}

impl<'a, T, R> Evaluator<'a, T, R>
where
    T: ?Sized,
    R: FieldResolver<T>,
{
    /// Starts a fresh session for `record`.
    pub fn new(record: &'a T, resolver: &'a R) -> Self {
        Evaluator {
            record,
            resolver,
            state: SessionState::default(),
        }
    }

    /// Applies one step to the session.
    pub fn apply(&mut self, step: &'a PredicateStep) -> Result<()> {
        let (record, resolver) = (self.record, self.resolver);
        self.state = self.state.next(step, |field, operand, mode| {
            let value = resolver.resolve(record, field)?;
            compare::matches(field, &value, operand, mode)
        })?;
        Ok(())
    }

    /// Replays every step of `program` and returns the final verdict.
    pub fn run(&mut self, program: &'a PredicateProgram) -> Result<bool> {
        for step in program {
            self.apply(step)?;
        }
        Ok(self.is_match())
    }

    /// Returns the verdict of the last executed comparison.
    pub fn is_match(&self) -> bool {
        self.state.verdict
    }

    /// Returns a copy of the current session state.
    pub fn state(&self) -> SessionState<'a> {
        self.state
    }

    /// Returns the field bound for unary comparisons, if any.
    pub fn current_field(&self) -> Option<&'a str> {
        self.state.current_field
    }
}
