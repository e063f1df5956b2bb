//! Top-level matching.
//!
//! [`matches`] normalizes a query and checks every resulting condition
//! against the comparand. Conditions are ANDed and evaluation stops at the
//! first one that fails.

use serde_json::Value;

use crate::descriptor::{normalize, normalize_items, Condition, Normalized, QueryInput, QueryItem};
use crate::value::strict_eq;

/// Returns `true` if `comparand` satisfies `query`.
///
/// A null comparand never matches. A primitive query is compared with the
/// whole comparand. Any other query matches when all of its conditions hold,
/// so an empty list matches every non-null comparand.
///
/// # Example
///
/// ```
/// use phonedit_match::{matches, ArrayMatch, Descriptor, QueryInput};
/// use serde_json::json;
///
/// let query = QueryInput::from(vec![
///     Descriptor::new("metadata.type", "uniliteral"),
///     Descriptor::new("tags", "egyptian").with_array_match(ArrayMatch::Includes),
/// ]);
/// let sign = json!({"metadata": {"type": "uniliteral"}, "tags": ["egyptian", "ancient"]});
///
/// assert!(matches(&query, &sign));
/// ```
pub fn matches(query: &QueryInput, comparand: &Value) -> bool {
    if comparand.is_null() {
        return false;
    }

    match normalize(query) {
        Normalized::Primitive(value) => strict_eq(value, comparand),
        Normalized::Conditions(conditions) => all_hold(&conditions, comparand),
    }
}

/// Matches a list of query items, as a recursive descriptor does.
pub(crate) fn matches_items(items: &[QueryItem], comparand: &Value) -> bool {
    if comparand.is_null() {
        return false;
    }
    all_hold(&normalize_items(items), comparand)
}

fn all_hold(conditions: &[Condition<'_>], comparand: &Value) -> bool {
    conditions
        .iter()
        .all(|condition| condition_holds(condition, comparand))
}

fn condition_holds(condition: &Condition<'_>, comparand: &Value) -> bool {
    let Condition::Check {
        path,
        value,
        array_match,
        recursive,
    } = *condition
    else {
        log::trace!("malformed query item never matches");
        return false;
    };

    let Some(target) = path.resolve(comparand) else {
        return false;
    };

    // A blank search term must not select everything.
    if value.is_blank_string() {
        return false;
    }

    if let (Some(strategy), Value::Array(_)) = (array_match, target) {
        return strategy.matches(value, target);
    }

    if recursive {
        if let Some(result) = value.evaluate_as_conditions(target) {
            return result;
        }
    }

    value.evaluate(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Descriptor, TupleOptions};
    use crate::kind::TypeTag;
    use crate::matcher::Matcher;
    use crate::path::Path;
    use crate::strategy::ArrayMatch;
    use serde_json::json;

    fn sign() -> Value {
        json!({
            "metadata": {"type": "uniliteral", "phonetic": "a"},
            "tags": ["egyptian", "ancient"],
            "name": "anything"
        })
    }

    #[test]
    fn null_comparand_never_matches() {
        assert!(!matches(&QueryInput::List(vec![]), &Value::Null));
        assert!(!matches(&QueryInput::Primitive(Value::Null), &Value::Null));
    }

    #[test]
    fn empty_list_matches_any_non_null() {
        assert!(matches(&QueryInput::List(vec![]), &json!(0)));
        assert!(matches(&QueryInput::Mapping(vec![]), &sign()));
    }

    #[test]
    fn primitive_query_is_strict_equality() {
        assert!(matches(&QueryInput::Primitive(json!("gato")), &json!("gato")));
        assert!(!matches(&QueryInput::Primitive(json!("1")), &json!(1)));
    }

    #[test]
    fn end_to_end_tuple_list() {
        let query = QueryInput::List(vec![
            QueryItem::tuple("metadata.type", "uniliteral"),
            QueryItem::Tuple {
                path: Path::from("tags"),
                value: Matcher::from("egyptian"),
                options: TupleOptions {
                    array_match: Some(ArrayMatch::Includes),
                    recursive: false,
                },
            },
        ]);
        assert!(matches(&query, &sign()));
    }

    #[test]
    fn missing_path_fails() {
        let query = QueryInput::from(Descriptor::new("metadata.missing", "x"));
        assert!(!matches(&query, &sign()));
    }

    #[test]
    fn blank_query_value_fails() {
        let query = QueryInput::List(vec![QueryItem::tuple("name", "  ")]);
        assert!(!matches(&query, &sign()));
        let query = QueryInput::List(vec![QueryItem::tuple("name", "")]);
        assert!(!matches(&query, &json!({"name": ""})));
    }

    #[test]
    fn malformed_item_fails_the_whole_query() {
        let query = QueryInput::List(vec![
            QueryItem::tuple("metadata.type", "uniliteral"),
            QueryItem::Malformed,
        ]);
        assert!(!matches(&query, &sign()));
    }

    #[test]
    fn array_match_only_applies_to_arrays() {
        let query = QueryInput::from(
            Descriptor::new("metadata.type", "uniliteral").with_array_match(ArrayMatch::Some),
        );
        assert!(matches(&query, &sign()));
    }

    #[test]
    fn array_without_strategy_is_compared_whole() {
        let whole = QueryInput::from(Descriptor::new("tags", json!(["egyptian", "ancient"])));
        assert!(matches(&whole, &sign()));
        let element = QueryInput::from(Descriptor::new("tags", "egyptian"));
        assert!(!matches(&element, &sign()));
    }

    #[test]
    fn recursive_condition_list() {
        let nested = Matcher::Conditions(vec![
            QueryItem::tuple("type", "uniliteral"),
            QueryItem::tuple("phonetic", "a"),
        ]);
        let query = QueryInput::from(Descriptor::new("metadata", nested.clone()).with_recursion());
        assert!(matches(&query, &sign()));

        let flat = QueryInput::from(Descriptor::new("metadata", nested));
        assert!(!matches(&flat, &sign()));
    }

    #[test]
    fn nested_mapping_value() {
        let query = QueryInput::from(Descriptor::new(
            "metadata",
            Matcher::query(QueryInput::Mapping(vec![(
                Path::from("phonetic"),
                Matcher::Type(TypeTag::String),
            )])),
        ));
        assert!(matches(&query, &sign()));
    }

    #[test]
    fn conjunction() {
        let d1 = Descriptor::new("metadata.type", "uniliteral");
        let d2 = Descriptor::new("name", "other");
        let both = QueryInput::from(vec![d1.clone(), d2.clone()]);
        let expected =
            matches(&QueryInput::from(d1), &sign()) && matches(&QueryInput::from(d2), &sign());
        assert_eq!(matches(&both, &sign()), expected);
    }
}
