//! Type predicates.
//!
//! A [`TypeTag`] matches a value by its runtime kind rather than its content.
//! An [`InstanceTag`] is the nominal variant: a named check supplied by the
//! caller, for record types that the six built-in kinds cannot tell apart.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::error::MatchError;

/// Built-in type predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Any string.
    String,
    /// Any number, integer or float.
    Number,
    /// `true` or `false`.
    Boolean,
    /// A mapping. Arrays and null are not objects.
    Object,
    /// An ordered sequence.
    Array,
    /// A callable. JSON data holds no functions, so this never accepts.
    Function,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 6] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Object,
        TypeTag::Array,
        TypeTag::Function,
    ];

    /// Returns `true` if the value's kind is exactly this tag.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            TypeTag::String => value.is_string(),
            TypeTag::Number => value.is_number(),
            TypeTag::Boolean => value.is_boolean(),
            TypeTag::Object => value.is_object(),
            TypeTag::Array => value.is_array(),
            TypeTag::Function => false,
        }
    }

    /// Returns the name used in `$type` markers.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MatchError::UnknownType(s.to_string()))
    }
}

/// Nominal type check.
///
/// Pairs a name with a predicate deciding membership. Two tags are the same
/// tag only if they are clones of one another.
///
/// # Example
///
/// ```
/// use phonedit_match::InstanceTag;
/// use serde_json::json;
///
/// let vowel = InstanceTag::new("Vowel", |v| v["type"] == "vowel");
/// assert!(vowel.accepts(&json!({"letter": "i", "type": "vowel"})));
/// assert!(!vowel.accepts(&json!({"letter": "p", "type": "consonant"})));
/// ```
#[derive(Clone)]
pub struct InstanceTag {
    name: String,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl InstanceTag {
    /// Creates a tag from a name and a membership predicate.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        InstanceTag {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Returns the tag's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the value is an instance of this tag.
    pub fn accepts(&self, value: &Value) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for InstanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InstanceTag").field(&self.name).finish()
    }
}
