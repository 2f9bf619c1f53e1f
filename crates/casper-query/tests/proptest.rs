//! Property-based tests for the query engine using proptest.

use casper_query::{
    between, FieldValue, ListQuery, Number, PredicateProgram, QueryError, Record, Value,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    value: i64,
    name: String,
    active: bool,
}

impl Record for TestItem {
    fn field_value(&self, field: &str) -> Option<Value<'_>> {
        match field {
            "value" => Some(self.value.field_value()),
            "name" => Some(self.name.field_value()),
            "active" => Some(self.active.field_value()),
            _ => None,
        }
    }
}

fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (-1000i64..1000, "[a-z]{1,10}", any::<bool>()).prop_map(|(value, name, active)| TestItem {
        value,
        name,
        active,
    })
}

fn matches(program: &PredicateProgram, item: &TestItem) -> Result<bool, QueryError> {
    Ok(ListQuery::new(program).count(std::slice::from_ref(item))? == 1)
}

/// Builds a random program from a small step vocabulary.
fn arbitrary_program(ops: &[u8], threshold: i64) -> PredicateProgram {
    ops.iter()
        .fold(PredicateProgram::new(), |program, op| match op % 10 {
            0 => program.where_("value"),
            1 => program.and(),
            2 => program.or(),
            3 => program.not(),
            4 => program.gt(threshold),
            5 => program.field_like("name", "%a%"),
            6 => program.and_where("active"),
            7 => program.is(true),
            8 => program.field_between("value", threshold, threshold.wrapping_neg()),
            _ => program.limit((threshold.unsigned_abs() % 5) as usize),
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// `not().eq(x)` and `ne(x)` always agree.
    #[test]
    fn not_eq_equals_ne(item in test_item_strategy(), x in -1000i64..1000) {
        let not_eq = PredicateProgram::new().where_("value").not().eq(x);
        let ne = PredicateProgram::new().where_("value").ne(x);
        prop_assert_eq!(matches(&not_eq, &item)?, matches(&ne, &item)?);
    }

    /// `eq` and `ne` are exact complements on a single comparison.
    #[test]
    fn eq_ne_complement(item in test_item_strategy(), x in -1000i64..1000) {
        let eq = PredicateProgram::new().where_("value").eq(x);
        let ne = PredicateProgram::new().where_("value").ne(x);
        prop_assert_ne!(matches(&eq, &item)?, matches(&ne, &item)?);
    }

    /// Bound order never changes a between test.
    #[test]
    fn between_is_symmetric(v in any::<i64>(), a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(
            between(Number::I64(v), Number::I64(a), Number::I64(b)),
            between(Number::I64(v), Number::I64(b), Number::I64(a))
        );
    }

    /// Both bounds are inside the range.
    #[test]
    fn between_is_inclusive(a in -1e9f64..1e9, b in -1e9f64..1e9) {
        prop_assert!(between(Number::F64(a), Number::F64(a), Number::F64(b)));
        prop_assert!(between(Number::F64(b), Number::F64(a), Number::F64(b)));
    }

    /// A false verdict before `and` short-circuits, even on an unknown field.
    #[test]
    fn and_after_false_skips(item in test_item_strategy()) {
        let program = PredicateProgram::new()
            .where_("value")
            .gt(i64::MAX)
            .and()
            .field_eq("missing", 1);
        prop_assert!(!matches(&program, &item)?);
    }

    /// A true verdict before `or` short-circuits, even on an unknown field.
    #[test]
    fn or_after_true_skips(item in test_item_strategy()) {
        let program = PredicateProgram::new()
            .where_("value")
            .ge(i64::MIN)
            .or()
            .field_eq("missing", 1);
        prop_assert!(matches(&program, &item)?);
    }

    /// A literal pattern without `%` matches only the identical string.
    #[test]
    fn like_without_wildcard_is_equality(name in "[a-z.*+?()]{1,10}", other in "[a-z.*+?()]{1,10}") {
        let item = TestItem { value: 0, name: name.clone(), active: true };
        let program = PredicateProgram::new().where_("name").like(other.clone());
        prop_assert_eq!(matches(&program, &item)?, name == other);
    }

    /// Prefix patterns match exactly the strings with that prefix.
    #[test]
    fn like_prefix(name in "[a-z%]{0,10}", prefix in "[a-z]{0,4}") {
        let item = TestItem { value: 0, name: name.clone(), active: true };
        let program = PredicateProgram::new().where_("name").like(format!("{prefix}%"));
        prop_assert_eq!(matches(&program, &item)?, name.starts_with(&prefix));
    }

    /// Infix patterns match exactly the strings containing the infix.
    #[test]
    fn like_contains(name in "[a-z%]{0,10}", infix in "[a-z]{0,4}") {
        let item = TestItem { value: 0, name: name.clone(), active: true };
        let program = PredicateProgram::new().where_("name").like(format!("%{infix}%"));
        prop_assert_eq!(matches(&program, &item)?, name.contains(&infix));
    }

    /// Results never exceed the limit or the input, and keep input order.
    #[test]
    fn limit_bounds_results(
        items in prop::collection::vec(test_item_strategy(), 0..60),
        threshold in -1000i64..1000,
        limit in 1usize..20,
    ) {
        let program = PredicateProgram::new().where_("value").gt(threshold).limit(limit);
        let found = ListQuery::new(&program).filter(&items).unwrap();
        prop_assert!(found.len() <= limit);

        let expected: Vec<i64> = items
            .iter()
            .filter(|i| i.value > threshold)
            .take(limit)
            .map(|i| i.value)
            .collect();
        let actual: Vec<i64> = found.iter().map(|i| i.value).collect();
        prop_assert_eq!(actual, expected);
    }

    /// first() agrees with the head of an unlimited filter().
    #[test]
    fn first_consistent_with_filter(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        threshold in -1000i64..1000,
    ) {
        let program = PredicateProgram::new().where_("value").lt(threshold);
        let query = ListQuery::new(&program);
        let first = query.first(&items).unwrap().map(|i| i.value);
        let head = query.filter(&items).unwrap().first().map(|i| i.value);
        prop_assert_eq!(first, head);
    }

    /// Rendering never panics, whatever the step sequence.
    #[test]
    fn rendering_never_fails(ops in prop::collection::vec(any::<u8>(), 0..30), threshold in any::<i64>()) {
        let program = arbitrary_program(&ops, threshold).with_collection("items");
        let text = program.to_string();
        prop_assert!(text.starts_with("select * from items"));
    }
}
