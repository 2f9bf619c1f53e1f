//! Predicate program builder.
//!
//! A [`PredicateProgram`] is the replayable form of a query: an ordered list
//! of [`PredicateStep`]s plus an optional result limit and target collection.
//! Step order is evaluation order and encodes the short-circuit dependencies
//! between comparisons, so the builder only ever appends.

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::operand::{Operand, Truth};
use crate::resolver::FieldResolver;
use crate::step::{Command, PredicateStep};
use crate::value::Number;

/// An ordered, append-only sequence of predicate steps.
///
/// # Example
///
/// ```
/// use casper_query::PredicateProgram;
///
/// let program = PredicateProgram::on("people")
///     .where_("name")
///     .like("Name%")
///     .and_where("age")
///     .gt(25)
///     .limit(2);
///
/// assert_eq!(program.steps().len(), 5);
/// assert_eq!(program.get_limit(), Some(2));
/// assert_eq!(
///     program.to_string(),
///     "select * from people where name like 'Name%' and age > 25 limit 2"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateProgram {
    collection: Option<String>,
    steps: Vec<PredicateStep>,
    limit: Option<usize>,
}

impl PredicateProgram {
    /// Creates an empty program with no target collection.
    pub fn new() -> Self {
        PredicateProgram::default()
    }

    /// Creates an empty program targeting the named collection.
    pub fn on(collection: impl Into<String>) -> Self {
        PredicateProgram {
            collection: Some(collection.into()),
            ..PredicateProgram::default()
        }
    }

    /// Sets the target collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Appends a step.
    ///
    /// A `Limit` step with a non-negative integer operand also sets the
    /// program limit; the last one wins. Any other `Limit` operand leaves the
    /// current limit unchanged.
    pub fn push(mut self, step: PredicateStep) -> Self {
        self.push_step(step);
        self
    }

    /// Appends a step in place.
    pub fn push_step(&mut self, step: PredicateStep) {
        if step.command() == Command::Limit {
            if let Some(n) = step
                .operand()
                .and_then(Operand::as_number)
                .and_then(Number::as_count)
            {
                self.limit = Some(n);
            }
        }
        self.steps.push(step);
    }

    fn unary(self, command: Command, operand: impl Into<Operand>) -> Self {
        self.push(PredicateStep::unary(command, operand))
    }

    fn bound(self, command: Command, field: &str, operand: Option<Operand>) -> Self {
        self.push(PredicateStep::with_field(command, field, operand))
    }

    // ========================================================================
    // Field binding and connectives
    // ========================================================================

    /// Binds the current field used by the unary comparisons that follow.
    pub fn where_(self, field: &str) -> Self {
        self.bound(Command::WhereField, field, None)
    }

    /// Keeps the current field binding. Has no effect on evaluation.
    pub fn where_current(self) -> Self {
        self.push(PredicateStep::new(Command::Where))
    }

    /// Skips the next comparison unless the current verdict is true.
    pub fn and(self) -> Self {
        self.push(PredicateStep::new(Command::And))
    }

    /// Like [`and`](Self::and), also binding `field` as the current field.
    pub fn and_where(self, field: &str) -> Self {
        self.bound(Command::AndField, field, None)
    }

    /// Skips the next comparison if the current verdict is already true.
    pub fn or(self) -> Self {
        self.push(PredicateStep::new(Command::Or))
    }

    /// Like [`or`](Self::or), also binding `field` as the current field.
    pub fn or_where(self, field: &str) -> Self {
        self.bound(Command::OrField, field, None)
    }

    /// Inverts the verdict of the next comparison.
    pub fn not(self) -> Self {
        self.push(PredicateStep::new(Command::Not))
    }

    // ========================================================================
    // Comparisons on the current field
    // ========================================================================

    /// Current field equals `value`.
    pub fn eq(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Eq, value)
    }

    /// Current field does not equal `value`.
    pub fn ne(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Ne, value)
    }

    /// Current field is less than `value`.
    pub fn lt(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Lt, value)
    }

    /// Current field is greater than `value`.
    pub fn gt(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Gt, value)
    }

    /// Current field is less than or equal to `value`.
    pub fn le(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Le, value)
    }

    /// Current field is greater than or equal to `value`.
    pub fn ge(self, value: impl Into<Operand>) -> Self {
        self.unary(Command::Ge, value)
    }

    /// Current field matches the glob `pattern` (`%` wildcard, `\%` literal).
    pub fn like(self, pattern: impl Into<String>) -> Self {
        self.unary(Command::Like, Operand::pattern(pattern))
    }

    /// Current field equals any of `values`.
    pub fn in_<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.unary(Command::In, Operand::list(values))
    }

    /// Current field lies within `[start, end]`, bounds in either order.
    pub fn between(self, start: impl Into<Number>, end: impl Into<Number>) -> Self {
        self.unary(Command::Between, Operand::range(start, end))
    }

    /// Current field has the given truth value.
    pub fn is(self, truth: impl Into<Truth>) -> Self {
        self.unary(Command::Is, Operand::Truth(truth.into()))
    }

    /// Current field does not have the given truth value.
    pub fn is_not(self, truth: impl Into<Truth>) -> Self {
        self.unary(Command::IsNot, Operand::Truth(truth.into()))
    }

    /// Current field is null.
    pub fn is_null(self) -> Self {
        self.is(Truth::Unknown)
    }

    /// Current field is not null.
    pub fn is_not_null(self) -> Self {
        self.is_not(Truth::Unknown)
    }

    // ========================================================================
    // Comparisons on an explicit field
    // ========================================================================

    /// `field` equals `value`.
    pub fn field_eq(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::EqField, field, Some(value.into()))
    }

    /// `field` does not equal `value`.
    pub fn field_ne(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::NeField, field, Some(value.into()))
    }

    /// `field` is less than `value`.
    pub fn field_lt(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::LtField, field, Some(value.into()))
    }

    /// `field` is greater than `value`.
    pub fn field_gt(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::GtField, field, Some(value.into()))
    }

    /// `field` is less than or equal to `value`.
    pub fn field_le(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::LeField, field, Some(value.into()))
    }

    /// `field` is greater than or equal to `value`.
    pub fn field_ge(self, field: &str, value: impl Into<Operand>) -> Self {
        self.bound(Command::GeField, field, Some(value.into()))
    }

    /// `field` matches the glob `pattern`.
    pub fn field_like(self, field: &str, pattern: impl Into<String>) -> Self {
        self.bound(Command::LikeField, field, Some(Operand::pattern(pattern)))
    }

    /// `field` equals any of `values`.
    pub fn field_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        self.bound(Command::InField, field, Some(Operand::list(values)))
    }

    /// `field` lies within `[start, end]`, bounds in either order.
    pub fn field_between(
        self,
        field: &str,
        start: impl Into<Number>,
        end: impl Into<Number>,
    ) -> Self {
        self.bound(Command::BetweenField, field, Some(Operand::range(start, end)))
    }

    /// `field` has the given truth value.
    pub fn field_is(self, field: &str, truth: impl Into<Truth>) -> Self {
        self.bound(Command::IsField, field, Some(Operand::Truth(truth.into())))
    }

    /// `field` does not have the given truth value.
    pub fn field_is_not(self, field: &str, truth: impl Into<Truth>) -> Self {
        self.bound(Command::IsNotField, field, Some(Operand::Truth(truth.into())))
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Caps the number of results. `0` means unbounded.
    pub fn limit(self, n: usize) -> Self {
        self.unary(Command::Limit, n)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the steps in evaluation order.
    pub fn steps(&self) -> &[PredicateStep] {
        &self.steps
    }

    /// Returns an iterator over the steps in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, PredicateStep> {
        self.steps.iter()
    }

    /// Returns the target collection, if set.
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Returns the result limit, or `None` when unbounded.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }

    /// Returns `true` if the program has no steps (matches nothing: the
    /// initial verdict is false).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluates the program against a single record.
    pub fn matches<T, R>(&self, record: &T, resolver: &R) -> Result<bool>
    where
        T: ?Sized,
        R: FieldResolver<T>,
    {
        Evaluator::new(record, resolver).run(self)
    }
}

impl<'a> IntoIterator for &'a PredicateProgram {
    type Item = &'a PredicateStep;
    type IntoIter = std::slice::Iter<'a, PredicateStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_in_order() {
        let program = PredicateProgram::new()
            .where_("name")
            .like("Name%")
            .and_where("age")
            .gt(25);

        let commands: Vec<Command> = program.iter().map(PredicateStep::command).collect();
        assert_eq!(
            commands,
            vec![
                Command::WhereField,
                Command::Like,
                Command::AndField,
                Command::Gt
            ]
        );
        assert_eq!(program.steps()[0].field(), Some("name"));
        assert_eq!(program.steps()[2].field(), Some("age"));
        assert_eq!(program.steps()[3].operand(), Some(&Operand::from(25)));
    }

    #[test]
    fn field_forms_carry_their_field() {
        let program = PredicateProgram::new()
            .field_eq("id", 1)
            .or()
            .field_in("id", [4, 6])
            .or()
            .field_between("age", 20, 30)
            .or()
            .field_is("active", true);

        for step in program.iter().filter(|s| s.command().is_comparison()) {
            assert!(step.command().takes_field());
            assert!(step.field().is_some());
            assert!(step.operand().is_some());
        }
    }

    #[test]
    fn limit_sets_program_limit() {
        let program = PredicateProgram::new().limit(5);
        assert_eq!(program.get_limit(), Some(5));
        assert_eq!(program.steps().len(), 1);

        let program = program.limit(2);
        assert_eq!(program.get_limit(), Some(2));
    }

    #[test]
    fn zero_limit_is_unbounded() {
        assert_eq!(PredicateProgram::new().limit(0).get_limit(), None);
        assert_eq!(PredicateProgram::new().get_limit(), None);
    }

    #[test]
    fn limit_steps_without_a_count_keep_the_limit() {
        for operand in [Operand::from(-1), Operand::from(2.5), Operand::from("2")] {
            let program = PredicateProgram::new()
                .limit(3)
                .push(PredicateStep::unary(Command::Limit, operand));
            assert_eq!(program.get_limit(), Some(3));
            assert_eq!(program.steps().len(), 2);
        }

        let program = PredicateProgram::new()
            .limit(3)
            .push(PredicateStep::unary(Command::Limit, 7.0));
        assert_eq!(program.get_limit(), Some(7));
    }

    #[test]
    fn collection_target() {
        assert_eq!(PredicateProgram::on("cats").collection(), Some("cats"));
        assert_eq!(PredicateProgram::new().collection(), None);
        assert_eq!(
            PredicateProgram::new().with_collection("dogs").collection(),
            Some("dogs")
        );
    }

    #[test]
    fn null_sugar_uses_unknown_truth() {
        let program = PredicateProgram::new().where_("x").is_null().is_not_null();
        assert_eq!(program.steps()[1].command(), Command::Is);
        assert_eq!(
            program.steps()[1].operand(),
            Some(&Operand::Truth(Truth::Unknown))
        );
        assert_eq!(program.steps()[2].command(), Command::IsNot);
    }

    #[test]
    fn programs_are_reusable_values() {
        let base = PredicateProgram::new().where_("age").gt(25);
        let limited = base.clone().limit(1);
        assert_eq!(base.get_limit(), None);
        assert_eq!(limited.get_limit(), Some(1));
        assert_eq!(base.steps(), &limited.steps()[..2]);
    }
}
