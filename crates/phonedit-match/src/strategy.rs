//! Array strategies.
//!
//! When a condition resolves to an array and carries an [`ArrayMatch`], the
//! array is checked element by element instead of as a whole.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::matcher::Matcher;
use crate::value::strict_eq;

/// How a query value is checked against the elements of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayMatch {
    /// At least one element satisfies the value.
    Some,
    /// Every element satisfies the value. Holds for an empty array.
    Every,
    /// Some element is literally equal to the value. Predicates such as
    /// regexes and type tags are not applied.
    Includes,
    /// Unrecognized strategy name. Never matches.
    Other(String),
}

impl ArrayMatch {
    /// Parses a strategy name. Unknown names become [`ArrayMatch::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "some" => ArrayMatch::Some,
            "every" => ArrayMatch::Every,
            "includes" => ArrayMatch::Includes,
            other => ArrayMatch::Other(other.to_string()),
        }
    }

    /// Returns the strategy name.
    pub fn as_str(&self) -> &str {
        match self {
            ArrayMatch::Some => "some",
            ArrayMatch::Every => "every",
            ArrayMatch::Includes => "includes",
            ArrayMatch::Other(name) => name,
        }
    }

    /// Applies this strategy to `candidate`.
    ///
    /// Returns `false` when the candidate is not an array. An empty array
    /// satisfies [`ArrayMatch::Every`] and nothing else.
    pub fn matches(&self, value: &Matcher, candidate: &Value) -> bool {
        let Value::Array(items) = candidate else {
            return false;
        };

        if items.is_empty() {
            return *self == ArrayMatch::Every;
        }

        match self {
            ArrayMatch::Some => items.iter().any(|item| value.evaluate(item)),
            ArrayMatch::Every => items.iter().all(|item| value.evaluate(item)),
            ArrayMatch::Includes => match value.as_literal() {
                Some(literal) => items.iter().any(|item| strict_eq(literal, item)),
                None => false,
            },
            ArrayMatch::Other(name) => {
                log::trace!("unknown array strategy '{}' never matches", name);
                false
            }
        }
    }
}

/// Checks `candidate` against `value` using `strategy`.
pub fn match_array(strategy: &ArrayMatch, value: &Matcher, candidate: &Value) -> bool {
    strategy.matches(value, candidate)
}

impl FromStr for ArrayMatch {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ArrayMatch::parse(s))
    }
}

impl fmt::Display for ArrayMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeTag;
    use serde_json::json;

    #[test]
    fn parse_names() {
        assert_eq!(ArrayMatch::parse("some"), ArrayMatch::Some);
        assert_eq!(ArrayMatch::parse("every"), ArrayMatch::Every);
        assert_eq!(ArrayMatch::parse("includes"), ArrayMatch::Includes);
        assert_eq!(
            ArrayMatch::parse("none"),
            ArrayMatch::Other("none".to_string())
        );
        assert_eq!(ArrayMatch::Includes.to_string(), "includes");
    }

    #[test]
    fn empty_array_law() {
        let empty = json!([]);
        let value = Matcher::from("x");
        assert!(ArrayMatch::Every.matches(&value, &empty));
        assert!(!ArrayMatch::Some.matches(&value, &empty));
        assert!(!ArrayMatch::Includes.matches(&value, &empty));
    }

    #[test]
    fn non_array_candidate_fails() {
        let value = Matcher::from("x");
        assert!(!ArrayMatch::Some.matches(&value, &json!("x")));
        assert!(!ArrayMatch::Every.matches(&value, &json!({"0": "x"})));
    }

    #[test]
    fn some_and_every() {
        let tags = json!(["noun", "animate", "singular"]);
        assert!(ArrayMatch::Some.matches(&Matcher::from("animate"), &tags));
        assert!(!ArrayMatch::Every.matches(&Matcher::from("animate"), &tags));

        let mixed = json!(["a", "b", 3, "d"]);
        let string = Matcher::Type(TypeTag::String);
        assert!(ArrayMatch::Some.matches(&string, &mixed));
        assert!(!ArrayMatch::Every.matches(&string, &mixed));
        assert!(ArrayMatch::Every.matches(&Matcher::Type(TypeTag::Number), &json!([1, 2, 3])));
    }

    #[test]
    fn includes_is_literal_only() {
        let tags = json!(["important", "new"]);
        assert!(ArrayMatch::Includes.matches(&Matcher::from("important"), &tags));
        assert!(!ArrayMatch::Includes.matches(&Matcher::from("archived"), &tags));

        let pattern = Matcher::pattern("^imp").unwrap();
        assert!(ArrayMatch::Some.matches(&pattern, &tags));
        assert!(!ArrayMatch::Includes.matches(&pattern, &tags));
    }

    #[test]
    fn unknown_strategy_never_matches() {
        let other = ArrayMatch::Other("most".to_string());
        assert!(!other.matches(&Matcher::from("a"), &json!(["a"])));
        assert!(!other.matches(&Matcher::from("a"), &json!([])));
    }
}
