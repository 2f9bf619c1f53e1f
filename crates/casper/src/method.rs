//! Query derivation from method names.
//!
//! A finder name such as `findByNameLikeAndAgeLimit` is split at its
//! uppercase letters and read left to right:
//!
//! | Token | Effect |
//! |-------|--------|
//! | `And`, `Or` | close the pending comparison, then add the connective |
//! | `Not` | negate the pending comparison (part of the field name if it starts one) |
//! | `Like` | turn the pending comparison into a `like` (part of the field name if it starts one) |
//! | `Limit` | as the last token only: close the pending comparison and take a limit argument |
//! | anything else | extend the pending field name, comparing by equality |
//!
//! Field names are converted to `snake_case`: `findByFirstName` queries
//! `first_name`. Every comparison and the limit consume one argument, in
//! order.

use casper_query::{Command, Operand, PredicateProgram, PredicateStep};

use crate::error::{Error, Result};

const MANY_PREFIXES: [&str; 2] = ["findAllBy", "findBy"];
const SINGLE_PREFIX: &str = "findOneBy";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Compare { command: Command, field: String },
    Connective(Command),
    Not,
    Limit,
}

/// A parsed finder name, ready to be bound to arguments.
///
/// # Example
///
/// ```
/// use casper::method::MethodQuery;
///
/// let query = MethodQuery::parse("people", "findByNameLikeAndAgeLimit").unwrap();
/// assert_eq!(query.arity(), 3);
///
/// let program = query.bind(&["J%".into(), 30.into(), 5.into()]).unwrap();
/// assert_eq!(
///     program.to_string(),
///     "select * from people where name like 'J%' and age = 30 limit 5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodQuery {
    collection: String,
    method: String,
    single: bool,
    parts: Vec<Part>,
}

impl MethodQuery {
    /// Parses `method` into a query template over `collection`.
    pub fn parse(collection: &str, method: &str) -> Result<Self> {
        let (single, criteria) = strip_prefix(method)?;
        let tokens = split_camel(criteria);
        if tokens.is_empty() {
            return Err(Error::syntax(format!("'{method}' has no criteria")));
        }

        let mut parts = Vec::new();
        let mut field = String::new();
        let mut command = Command::EqField;
        let last = tokens.len() - 1;

        for (index, token) in tokens.iter().enumerate() {
            match token.to_ascii_lowercase().as_str() {
                "and" | "or" => {
                    if field.is_empty() {
                        return Err(Error::syntax(format!(
                            "'{method}': '{token}' must follow a field name"
                        )));
                    }
                    parts.push(Part::Compare {
                        command,
                        field: snake_case(&field),
                    });
                    parts.push(Part::Connective(if token.eq_ignore_ascii_case("and") {
                        Command::And
                    } else {
                        Command::Or
                    }));
                    field.clear();
                    command = Command::EqField;
                }
                "not" if !field.is_empty() => parts.push(Part::Not),
                "like" if !field.is_empty() => command = Command::LikeField,
                "limit" if index == last => {
                    if !field.is_empty() {
                        parts.push(Part::Compare {
                            command,
                            field: snake_case(&field),
                        });
                        field.clear();
                    }
                    parts.push(Part::Limit);
                }
                _ => {
                    command = Command::EqField;
                    field.push_str(token);
                }
            }
        }

        if !field.is_empty() {
            parts.push(Part::Compare {
                command,
                field: snake_case(&field),
            });
        }

        Ok(MethodQuery {
            collection: collection.to_string(),
            method: method.to_string(),
            single,
            parts,
        })
    }

    /// Number of arguments the method expects.
    pub fn arity(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, Part::Compare { .. } | Part::Limit))
            .count()
    }

    /// Returns `true` for `findOneBy` methods.
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Returns the finder name this query was parsed from.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Builds the predicate program for one call.
    ///
    /// The argument count is checked before anything is built. A limit
    /// argument must be a non-negative integer.
    pub fn bind(&self, args: &[Operand]) -> Result<PredicateProgram> {
        let expected = self.arity();
        if args.len() != expected {
            return Err(Error::ArgumentCountMismatch {
                expected,
                actual: args.len(),
            });
        }

        let mut args = args.iter();
        let mut program = PredicateProgram::on(self.collection.as_str());
        for part in &self.parts {
            let step = match part {
                Part::Compare { command, field } => {
                    let arg = next_arg(&mut args)?.clone();
                    let operand = match (command, arg) {
                        (Command::LikeField, Operand::String(pattern)) => Operand::pattern(pattern),
                        (_, arg) => arg,
                    };
                    PredicateStep::with_field(*command, field.as_str(), Some(operand))
                }
                Part::Connective(command) => PredicateStep::new(*command),
                Part::Not => PredicateStep::new(Command::Not),
                Part::Limit => {
                    let n = next_arg(&mut args)?
                        .as_number()
                        .and_then(|n| n.as_count())
                        .ok_or_else(|| {
                            Error::syntax(format!(
                                "'{}': limit must be a non-negative integer",
                                self.method
                            ))
                        })?;
                    PredicateStep::unary(Command::Limit, n)
                }
            };
            program.push_step(step);
        }
        Ok(program)
    }
}

/// The result of deriving a query from a method call.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedQuery {
    pub program: PredicateProgram,
    /// `true` if the method returns at most one record.
    pub single: bool,
}

/// Parses `method` and binds it to `args` in one step.
pub fn derive(collection: &str, method: &str, args: &[Operand]) -> Result<DerivedQuery> {
    let query = MethodQuery::parse(collection, method)?;
    Ok(DerivedQuery {
        program: query.bind(args)?,
        single: query.is_single(),
    })
}

fn strip_prefix(method: &str) -> Result<(bool, &str)> {
    if let Some(rest) = method.strip_prefix(SINGLE_PREFIX) {
        return Ok((true, rest));
    }
    MANY_PREFIXES
        .iter()
        .find_map(|prefix| method.strip_prefix(prefix))
        .map(|rest| (false, rest))
        .ok_or_else(|| {
            Error::syntax(format!(
                "'{method}' must start with findBy, findAllBy or findOneBy"
            ))
        })
}

fn next_arg<'a>(args: &mut std::slice::Iter<'a, Operand>) -> Result<&'a Operand> {
    // Arity is checked up front, so this only fails on an internal mismatch.
    args.next()
        .ok_or_else(|| Error::syntax("not enough arguments"))
}

/// Splits before every uppercase letter: `NameLikeAnd` -> `Name`, `Like`, `And`.
fn split_camel(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_uppercase() && i > start {
            tokens.push(&s[start..i]);
            start = i;
        }
    }
    if start < s.len() {
        tokens.push(&s[start..]);
    }
    tokens
}

/// `FirstName` -> `first_name`.
fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
