//! Filter evaluation against document envelopes.
//!
//! This is the in-memory client's translation of the opaque [`Filter`]
//! predicate into its "native query syntax": direct evaluation over the
//! JSON envelope. Conditions apply to top-level fields; a missing field
//! satisfies only `IsNotDefined`.

use std::cmp::Ordering;

use serde_json::Value;

use docstore_core::types::filter::{Filter, FilterField, FilterOp, FilterValue};

/// Whether an envelope satisfies every condition of a filter.
///
/// An empty filter matches every document.
pub fn matches(envelope: &Value, filter: &Filter) -> bool {
    filter
        .conditions
        .iter()
        .all(|condition| matches_condition(envelope, condition))
}

fn matches_condition(envelope: &Value, condition: &FilterField) -> bool {
    let actual = envelope.get(&condition.field);
    match condition.op {
        FilterOp::IsDefined => actual.is_some(),
        FilterOp::IsNotDefined => actual.is_none(),
        _ => match actual {
            Some(actual) => compare(actual, condition.op, &condition.value),
            None => false,
        },
    }
}

fn compare(actual: &Value, op: FilterOp, expected: &FilterValue) -> bool {
    match op {
        FilterOp::Eq => equals(actual, expected),
        FilterOp::Ne => !equals(actual, expected),
        FilterOp::Gt => matches!(order(actual, expected), Some(Ordering::Greater)),
        FilterOp::Gte => matches!(
            order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::Lt => matches!(order(actual, expected), Some(Ordering::Less)),
        FilterOp::Lte => matches!(
            order(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::Contains => match (actual.as_str(), expected) {
            (Some(actual), FilterValue::String(pattern)) => actual.contains(pattern.as_str()),
            _ => false,
        },
        FilterOp::In => match (actual.as_str(), expected) {
            (Some(actual), FilterValue::StringList(values)) => {
                values.iter().any(|v| v == actual)
            }
            _ => false,
        },
        // Presence checks are resolved before the field value is read.
        FilterOp::IsDefined | FilterOp::IsNotDefined => true,
    }
}

fn equals(actual: &Value, expected: &FilterValue) -> bool {
    match expected {
        FilterValue::String(s) => actual.as_str() == Some(s.as_str()),
        FilterValue::Integer(i) => actual.as_f64() == Some(*i as f64),
        FilterValue::Float(f) => actual.as_f64() == Some(*f),
        FilterValue::Boolean(b) => actual.as_bool() == Some(*b),
        FilterValue::StringList(_) => false,
        FilterValue::Null => actual.is_null(),
    }
}

/// Total order between an envelope value and a filter value, where one
/// exists. Numbers compare numerically, strings lexicographically; every
/// other combination is unordered and fails the condition.
fn order(actual: &Value, expected: &FilterValue) -> Option<Ordering> {
    match expected {
        FilterValue::Integer(i) => actual.as_f64()?.partial_cmp(&(*i as f64)),
        FilterValue::Float(f) => actual.as_f64()?.partial_cmp(f),
        FilterValue::String(s) => Some(actual.as_str()?.cmp(s.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "id": "1",
            "name": "buy groceries",
            "priority": 3,
            "score": 1.5,
            "completed": false,
        })
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(matches(&doc(), &Filter::all()));
    }

    #[test]
    fn test_eq_on_each_scalar_type() {
        assert!(matches(&doc(), &Filter::matching("name", FilterOp::Eq, "buy groceries")));
        assert!(matches(&doc(), &Filter::matching("priority", FilterOp::Eq, 3i64)));
        assert!(matches(&doc(), &Filter::matching("score", FilterOp::Eq, 1.5f64)));
        assert!(matches(&doc(), &Filter::matching("completed", FilterOp::Eq, false)));
        assert!(!matches(&doc(), &Filter::matching("completed", FilterOp::Eq, true)));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(matches(&doc(), &Filter::matching("priority", FilterOp::Gt, 2i64)));
        assert!(matches(&doc(), &Filter::matching("priority", FilterOp::Lte, 3i64)));
        assert!(!matches(&doc(), &Filter::matching("priority", FilterOp::Lt, 3i64)));
        assert!(matches(&doc(), &Filter::matching("score", FilterOp::Gte, 1.5f64)));
    }

    #[test]
    fn test_string_contains_and_in() {
        assert!(matches(&doc(), &Filter::matching("name", FilterOp::Contains, "groceries")));
        assert!(!matches(&doc(), &Filter::matching("name", FilterOp::Contains, "laundry")));
        assert!(matches(
            &doc(),
            &Filter::matching(
                "id",
                FilterOp::In,
                vec!["1".to_string(), "2".to_string()]
            )
        ));
    }

    #[test]
    fn test_missing_field_satisfies_only_is_not_defined() {
        let filter = Filter::matching("owner", FilterOp::Eq, "alice");
        assert!(!matches(&doc(), &filter));
        let filter = Filter::matching("owner", FilterOp::Ne, "alice");
        assert!(!matches(&doc(), &filter));
        assert!(matches(&doc(), &Filter::matching("owner", FilterOp::IsNotDefined, FilterValue::Null)));
        assert!(matches(&doc(), &Filter::matching("name", FilterOp::IsDefined, FilterValue::Null)));
    }

    #[test]
    fn test_conjunction() {
        let filter = Filter::matching("completed", FilterOp::Eq, false).and(
            "priority",
            FilterOp::Gte,
            3i64,
        );
        assert!(matches(&doc(), &filter));
        let filter = Filter::matching("completed", FilterOp::Eq, false).and(
            "priority",
            FilterOp::Gt,
            3i64,
        );
        assert!(!matches(&doc(), &filter));
    }

    #[test]
    fn test_type_mismatch_is_unordered() {
        assert!(!matches(&doc(), &Filter::matching("name", FilterOp::Gt, 5i64)));
        assert!(!matches(&doc(), &Filter::matching("completed", FilterOp::Lt, 1i64)));
    }
}
