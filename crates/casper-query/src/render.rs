//! Textual rendering of predicate programs.
//!
//! The rendered form is SQL-like and meant for logs and error messages only;
//! it is never parsed back.

use std::fmt;

use crate::program::PredicateProgram;
use crate::step::{Command, PredicateStep};

const DEFAULT_COLLECTION: &str = "records";
const UNBOUND: &str = "?";

impl fmt::Display for PredicateProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "select * from {}",
            self.collection().unwrap_or(DEFAULT_COLLECTION)
        )?;

        let clause = render_steps(self.steps());
        if !clause.is_empty() {
            write!(f, " where {}", clause.join(" "))?;
        }
        if let Some(limit) = self.get_limit() {
            write!(f, " limit {limit}")?;
        }
        Ok(())
    }
}

/// Renders the steps into tokens, tracking the current field so unary
/// comparisons can name their subject.
fn render_steps(steps: &[PredicateStep]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current: Option<&str> = None;
    // True while the last emitted token is a field name awaiting its operator.
    let mut subject_pending = false;

    for step in steps {
        let command = step.command();
        match command {
            Command::Where | Command::Limit => {}
            Command::WhereField => {
                current = step.field();
                tokens.push(current.unwrap_or(UNBOUND).to_string());
                subject_pending = true;
            }
            Command::Not if subject_pending => {
                // Negation reads before the subject it applies to.
                let at = tokens.len().saturating_sub(1);
                tokens.insert(at, command.token().to_string());
            }
            Command::And | Command::Or | Command::Not => {
                tokens.push(command.token().to_string());
            }
            Command::AndField | Command::OrField => {
                current = step.field();
                tokens.push(command.token().to_string());
                tokens.push(current.unwrap_or(UNBOUND).to_string());
                subject_pending = true;
            }
            _ => {
                match step.field() {
                    Some(field) => tokens.push(field.to_string()),
                    None if !subject_pending => {
                        tokens.push(current.unwrap_or(UNBOUND).to_string())
                    }
                    None => {}
                }
                tokens.push(command.token().to_string());
                tokens.push(
                    step.operand()
                        .map_or_else(|| UNBOUND.to_string(), ToString::to_string),
                );
                subject_pending = false;
            }
        }
    }
    tokens
}
