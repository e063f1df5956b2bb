//! Query values.
//!
//! A [`Matcher`] is the `value` side of a descriptor: what a resolved
//! candidate is checked against. Dispatch is on the kind of matcher, never on
//! the kind of candidate.

use regex::Regex;
use serde_json::Value;

use crate::descriptor::{QueryInput, QueryItem};
use crate::error::Result;
use crate::kind::{InstanceTag, TypeTag};
use crate::matching::{matches, matches_items};
use crate::value::strict_eq;

/// The comparand of a single condition.
///
/// # Example
///
/// ```
/// use phonedit_match::{evaluate, Matcher, TypeTag};
/// use serde_json::json;
///
/// assert!(evaluate(&Matcher::pattern("^Spring").unwrap(), &json!("Springfield")));
/// assert!(evaluate(&Matcher::Type(TypeTag::Number), &json!(42)));
/// assert!(evaluate(&Matcher::from("gato"), &json!("gato")));
/// ```
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Literal value, compared with [`strict_eq`]. A literal object is a
    /// plain mapping and is matched as a nested query instead.
    Literal(Value),
    /// Regular expression, tested against string candidates (partial match).
    Pattern(Regex),
    /// Built-in type predicate.
    Type(TypeTag),
    /// Nominal type predicate.
    Instance(InstanceTag),
    /// Nested query, matched against the candidate as a whole.
    Query(Box<QueryInput>),
    /// List of queries. Only consulted when the owning descriptor is
    /// flagged recursive; otherwise it is a list value that no data equals.
    Conditions(Vec<QueryItem>),
}

impl Matcher {
    /// Creates a literal matcher.
    pub fn literal(value: impl Into<Value>) -> Self {
        Matcher::Literal(value.into())
    }

    /// Compiles a regular expression matcher.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Matcher::Pattern(Regex::new(pattern)?))
    }

    /// Creates a nested query matcher.
    pub fn query(query: impl Into<QueryInput>) -> Self {
        Matcher::Query(Box::new(query.into()))
    }

    /// Returns `true` for a literal string that is empty or only whitespace.
    ///
    /// Conditions carrying such a value never match, so a half-typed search
    /// term cannot select everything.
    pub fn is_blank_string(&self) -> bool {
        matches!(self, Matcher::Literal(Value::String(s)) if s.trim().is_empty())
    }

    /// Returns the literal value, if this is a literal.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Matcher::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Checks a candidate against this matcher.
    pub fn evaluate(&self, candidate: &Value) -> bool {
        match self {
            Matcher::Pattern(regex) => candidate.as_str().is_some_and(|s| regex.is_match(s)),
            Matcher::Type(tag) => tag.accepts(candidate),
            Matcher::Instance(tag) => tag.accepts(candidate),
            Matcher::Query(query) => matches(query, candidate),
            Matcher::Literal(mapping @ Value::Object(_)) => {
                matches(&QueryInput::from(mapping.clone()), candidate)
            }
            Matcher::Literal(value) => strict_eq(value, candidate),
            Matcher::Conditions(_) => false,
        }
    }

    /// Runs this matcher as a list of queries against `target`.
    ///
    /// Used for descriptors flagged recursive. Returns `None` when the
    /// matcher is not a list.
    pub(crate) fn evaluate_as_conditions(&self, target: &Value) -> Option<bool> {
        match self {
            Matcher::Conditions(items) => Some(matches_items(items, target)),
            Matcher::Literal(list @ Value::Array(_)) => {
                Some(matches(&QueryInput::from(list.clone()), target))
            }
            _ => None,
        }
    }
}

/// Checks `candidate` against `matcher`.
pub fn evaluate(matcher: &Matcher, candidate: &Value) -> bool {
    matcher.evaluate(candidate)
}

// Conversions from common types to Matcher

impl From<Value> for Matcher {
    fn from(value: Value) -> Self {
        Matcher::Literal(value)
    }
}

impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        Matcher::Literal(Value::from(s))
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        Matcher::Literal(Value::from(s))
    }
}

impl From<bool> for Matcher {
    fn from(b: bool) -> Self {
        Matcher::Literal(Value::from(b))
    }
}

impl From<i32> for Matcher {
    fn from(n: i32) -> Self {
        Matcher::Literal(Value::from(n))
    }
}

impl From<i64> for Matcher {
    fn from(n: i64) -> Self {
        Matcher::Literal(Value::from(n))
    }
}

impl From<u32> for Matcher {
    fn from(n: u32) -> Self {
        Matcher::Literal(Value::from(n))
    }
}

impl From<u64> for Matcher {
    fn from(n: u64) -> Self {
        Matcher::Literal(Value::from(n))
    }
}

impl From<f64> for Matcher {
    fn from(n: f64) -> Self {
        Matcher::Literal(Value::from(n))
    }
}

impl From<Regex> for Matcher {
    fn from(r: Regex) -> Self {
        Matcher::Pattern(r)
    }
}

impl From<TypeTag> for Matcher {
    fn from(tag: TypeTag) -> Self {
        Matcher::Type(tag)
    }
}

impl From<InstanceTag> for Matcher {
    fn from(tag: InstanceTag) -> Self {
        Matcher::Instance(tag)
    }
}

impl From<QueryInput> for Matcher {
    fn from(query: QueryInput) -> Self {
        Matcher::Query(Box::new(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use serde_json::json;

    #[test]
    fn regex_partial_match_on_strings_only() {
        let m = Matcher::pattern("^Spring").unwrap();
        assert!(m.evaluate(&json!("Springfield")));
        assert!(!m.evaluate(&json!("Chicago")));
        assert!(!m.evaluate(&json!(42)));

        let inner = Matcher::pattern("field").unwrap();
        assert!(inner.evaluate(&json!("Springfield")));
    }

    #[test]
    fn type_predicates() {
        assert!(Matcher::Type(TypeTag::String).evaluate(&json!("x")));
        assert!(!Matcher::Type(TypeTag::String).evaluate(&json!(42)));
        assert!(Matcher::Type(TypeTag::Number).evaluate(&json!(42)));
        assert!(Matcher::Type(TypeTag::Boolean).evaluate(&json!(true)));
    }

    #[test]
    fn instance_predicate() {
        let tag = InstanceTag::new("Consonant", |v| v.get("place").is_some());
        let m = Matcher::from(tag);
        assert!(m.evaluate(&json!({"place": "bilabial"})));
        assert!(!m.evaluate(&json!({"height": "high"})));
    }

    #[test]
    fn literal_is_strict() {
        assert!(Matcher::from("gato").evaluate(&json!("gato")));
        assert!(!Matcher::from("1").evaluate(&json!(1)));
        assert!(Matcher::from(1).evaluate(&json!(1.0)));
        assert!(Matcher::literal(json!(["a"])).evaluate(&json!(["a"])));
    }

    #[test]
    fn nested_query_recurses() {
        let m = Matcher::query(Descriptor::new("value", "animate"));
        assert!(m.evaluate(&json!({"value": "animate"})));
        assert!(!m.evaluate(&json!({"value": "noun"})));
        assert!(!m.evaluate(&json!("animate")));
    }

    #[test]
    fn literal_object_is_a_plain_mapping() {
        let m = Matcher::literal(json!({"height": "high"}));
        assert!(m.evaluate(&json!({"height": "high", "backness": "front"})));
        assert!(!m.evaluate(&json!({"height": "low"})));
    }

    #[test]
    fn condition_list_is_not_a_value() {
        let m = Matcher::Conditions(vec![]);
        assert!(!m.evaluate(&json!([])));
        assert_eq!(m.evaluate_as_conditions(&json!({})), Some(true));
        assert_eq!(Matcher::from("x").evaluate_as_conditions(&json!({})), None);
    }

    #[test]
    fn blank_string_detection() {
        assert!(Matcher::from("").is_blank_string());
        assert!(Matcher::from("  \t").is_blank_string());
        assert!(!Matcher::from(" a ").is_blank_string());
        assert!(!Matcher::from(0).is_blank_string());
    }
}
