//! Existential search.
//!
//! [`match_any`] asks whether a query is satisfied anywhere inside a value,
//! at any depth, rather than at a fixed path. It works over the flattened
//! views produced by [`collect_values`] and [`collect_paths`].
//!
//! Both flattening routines walk with an explicit stack. Input must be
//! acyclic, which `serde_json::Value` always is.

use regex::Regex;
use serde_json::Value;

use crate::matcher::Matcher;
use crate::path::Path;
use crate::strategy::ArrayMatch;
use crate::value::strict_eq;

/// Query accepted by [`match_any`].
#[derive(Debug, Clone)]
pub enum Search {
    /// Scalar that some leaf must equal.
    Literal(Value),
    /// Pattern that some string leaf must match.
    Pattern(Regex),
    /// Matcher that some node, container or leaf, must satisfy. Arrays are
    /// checked with `array_match` when it is set.
    Value {
        value: Matcher,
        array_match: Option<ArrayMatch>,
    },
    /// Succeeds if any of the searches succeeds.
    Any(Vec<Search>),
    /// Succeeds if any entry's value is satisfied by some node. The keys are
    /// not consulted.
    Mapping(Vec<(Path, Matcher)>),
}

impl Search {
    /// Creates a descriptor-shaped search without an array strategy.
    pub fn value(value: impl Into<Matcher>) -> Self {
        Search::Value {
            value: value.into(),
            array_match: None,
        }
    }

    /// Returns `true` if this search is satisfied somewhere in `comparand`.
    pub fn matches(&self, comparand: &Value) -> bool {
        match_any(self, comparand)
    }
}

impl From<Regex> for Search {
    fn from(regex: Regex) -> Self {
        Search::Pattern(regex)
    }
}

impl From<&str> for Search {
    fn from(s: &str) -> Self {
        Search::Literal(Value::from(s))
    }
}

/// Returns `true` if `search` is satisfied by `comparand` or anything
/// reachable inside it.
///
/// # Example
///
/// ```
/// use phonedit_match::{match_any, ArrayMatch, Matcher, Search};
/// use serde_json::json;
///
/// let data = json!({"items": [{"tags": ["important", "new"]}, {"tags": ["archived"]}]});
///
/// assert!(match_any(&Search::from("archived"), &data));
/// assert!(match_any(
///     &Search::Value {
///         value: Matcher::from("important"),
///         array_match: Some(ArrayMatch::Includes),
///     },
///     &data,
/// ));
/// ```
pub fn match_any(search: &Search, comparand: &Value) -> bool {
    if comparand.is_null() {
        return false;
    }

    match search {
        Search::Literal(query) => collect_values(comparand)
            .into_iter()
            .any(|leaf| strict_eq(query, leaf)),
        Search::Pattern(regex) => collect_values(comparand)
            .into_iter()
            .any(|leaf| leaf.as_str().is_some_and(|s| regex.is_match(s))),
        Search::Value { value, array_match } => {
            any_node(comparand, value, array_match.as_ref())
        }
        Search::Any(searches) => searches.iter().any(|search| match_any(search, comparand)),
        Search::Mapping(entries) => entries
            .iter()
            .any(|(_, value)| any_node(comparand, value, None)),
    }
}

fn any_node(comparand: &Value, value: &Matcher, array_match: Option<&ArrayMatch>) -> bool {
    collect_paths(comparand)
        .into_iter()
        .any(|(_, node)| match (array_match, node) {
            (Some(strategy), Value::Array(_)) => strategy.matches(value, node),
            _ => value.evaluate(node),
        })
}

/// Collects every scalar leaf of `value` in document order.
///
/// Containers contribute only their contents. Nulls are skipped.
pub fn collect_values(value: &Value) -> Vec<&Value> {
    let mut collected = Vec::new();
    let mut stack = vec![value];

    while let Some(node) = stack.pop() {
        match node {
            Value::Null => {}
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(map) => stack.extend(map.values().rev()),
            leaf => collected.push(leaf),
        }
    }

    collected
}

/// Collects a `(path, value)` pair for every non-null node of `value`.
///
/// Containers are included as well as leaves and appear after their
/// descendants. Paths are dotted, array elements use their index, and the
/// root itself is reported under the empty path.
pub fn collect_paths(value: &Value) -> Vec<(String, &Value)> {
    enum Visit<'v> {
        Enter(String, &'v Value),
        Leave(String, &'v Value),
    }

    fn join(base: &str, key: &str) -> String {
        if base.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", base, key)
        }
    }

    let mut collected = Vec::new();
    let mut stack = vec![Visit::Enter(String::new(), value)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Leave(path, node) => collected.push((path, node)),
            Visit::Enter(_, Value::Null) => {}
            Visit::Enter(path, node @ Value::Array(items)) => {
                stack.push(Visit::Leave(path.clone(), node));
                for (index, item) in items.iter().enumerate().rev() {
                    stack.push(Visit::Enter(join(&path, &index.to_string()), item));
                }
            }
            Visit::Enter(path, node @ Value::Object(map)) => {
                stack.push(Visit::Leave(path.clone(), node));
                for (key, item) in map.iter().rev() {
                    stack.push(Visit::Enter(join(&path, key), item));
                }
            }
            Visit::Enter(path, leaf) => collected.push((path, leaf)),
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeTag;
    use serde_json::json;

    fn person() -> Value {
        json!({
            "name": "Homer",
            "address": {"city": "Springfield", "zip": null},
            "age": 39
        })
    }

    #[test]
    fn literal_anywhere() {
        assert!(match_any(&Search::from("Springfield"), &person()));
        assert!(!match_any(&Search::from("Chicago"), &person()));
        assert!(match_any(&Search::Literal(json!(39)), &person()));
    }

    #[test]
    fn literal_never_matches_containers_or_null() {
        assert!(!match_any(&Search::Literal(json!(null)), &person()));
        assert!(!match_any(
            &Search::Literal(json!({"city": "Springfield", "zip": null})),
            &person()
        ));
    }

    #[test]
    fn pattern_anywhere() {
        let search = Search::from(Regex::new("^Spring").unwrap());
        assert!(match_any(&search, &person()));
        let digits = Search::from(Regex::new("39").unwrap());
        assert!(!match_any(&digits, &person()));
    }

    #[test]
    fn null_comparand() {
        assert!(!match_any(&Search::Any(vec![]), &Value::Null));
        assert!(!match_any(&Search::from("x"), &Value::Null));
    }

    #[test]
    fn descriptor_reaches_containers() {
        let search = Search::value(Matcher::Type(TypeTag::Object));
        assert!(match_any(&search, &json!({"a": 1})));
        let search = Search::value(Matcher::literal(json!(["x", "y"])));
        assert!(match_any(&search, &json!({"tags": ["x", "y"]})));
    }

    #[test]
    fn descriptor_skips_blank_guard() {
        let search = Search::value("");
        assert!(match_any(&search, &json!({"note": ""})));
    }

    #[test]
    fn array_strategy_anywhere() {
        let data = json!({"items": [{"tags": ["important", "new"]}, {"tags": ["archived"]}]});
        let includes = |tag: &str| Search::Value {
            value: Matcher::from(tag),
            array_match: Some(ArrayMatch::Includes),
        };
        assert!(match_any(&includes("important"), &data));
        assert!(match_any(&includes("archived"), &data));
        assert!(!match_any(&includes("deleted"), &data));
    }

    #[test]
    fn any_is_a_disjunction() {
        let search = Search::Any(vec![Search::from("Chicago"), Search::from("Homer")]);
        assert!(match_any(&search, &person()));
        assert!(!match_any(&Search::Any(vec![]), &person()));
    }

    #[test]
    fn mapping_ignores_keys_and_ors_entries() {
        let search = Search::Mapping(vec![
            (Path::from("nowhere"), Matcher::from("Springfield")),
            (Path::from("name"), Matcher::from("Marge")),
        ]);
        assert!(match_any(&search, &person()));

        let none = Search::Mapping(vec![(Path::from("name"), Matcher::from("Marge"))]);
        assert!(!match_any(&none, &person()));
    }

    #[test]
    fn values_in_document_order() {
        let data = json!({"a": [1, {"b": "x"}], "c": null, "d": true});
        assert_eq!(
            collect_values(&data),
            vec![&json!(1), &json!("x"), &json!(true)]
        );
        assert_eq!(collect_values(&json!("leaf")), vec![&json!("leaf")]);
    }

    #[test]
    fn paths_include_every_node() {
        let data = json!({"tags": ["a", "b"], "gone": null});
        let paths: Vec<String> = collect_paths(&data).into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["tags.0", "tags.1", "tags", ""]);
    }

    #[test]
    fn scalar_root_has_empty_path() {
        assert_eq!(collect_paths(&json!(5)), vec![(String::new(), &json!(5))]);
        assert!(collect_paths(&Value::Null).is_empty());
    }
}
