//! Paths into nested values.
//!
//! A [`Path`] is an ordered list of keys. Object members are addressed by
//! name and array elements by decimal index, so `"items.0.tags"` walks into
//! the first element of `items`.

use std::fmt;

use serde_json::Value;

/// Location within a nested value.
///
/// Paths are built from a dotted string (split on `.`) or from a list of
/// keys. Keys given as a list are never split, so a key that itself contains
/// a dot can only be reached through the list form.
///
/// # Example
///
/// ```
/// use phonedit_match::Path;
/// use serde_json::json;
///
/// let data = json!({"metadata": {"type": "uniliteral"}});
///
/// let dotted = Path::parse("metadata.type");
/// let keys = Path::from(["metadata", "type"]);
/// assert_eq!(dotted, keys);
/// assert_eq!(dotted.resolve(&data), Some(&json!("uniliteral")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    /// Creates a path from a list of keys.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a dotted path. Every segment becomes a key, empty ones included.
    pub fn parse(dotted: &str) -> Self {
        Path::new(dotted.split('.'))
    }

    /// Returns the keys of this path.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the path has no keys and so addresses the root.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Walks the path from `object`, returning the value found there.
    ///
    /// Stops with `None` at the first step that cannot be taken: a missing
    /// member, an out-of-range or non-numeric index, or a scalar (null
    /// included) in the middle of the path. A `null` stored at the final key
    /// is a present value.
    pub fn resolve<'v>(&self, object: &'v Value) -> Option<&'v Value> {
        let mut current = object;
        for key in &self.keys {
            current = match current {
                Value::Object(map) => map.get(key)?,
                Value::Array(items) => items.get(array_index(key)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Canonical decimal index: digits only, no sign, no leading zero.
fn array_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key.len() == 1 || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys.join("."))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Path::parse(dotted)
    }
}

impl From<String> for Path {
    fn from(dotted: String) -> Self {
        Path::parse(&dotted)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for Path {
    fn from(keys: Vec<String>) -> Self {
        Path { keys }
    }
}

impl From<Vec<&str>> for Path {
    fn from(keys: Vec<&str>) -> Self {
        Path::new(keys)
    }
}

impl From<&[&str]> for Path {
    fn from(keys: &[&str]) -> Self {
        Path::new(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(keys: [&str; N]) -> Self {
        Path::new(keys)
    }
}

/// Returns the value at `path` inside `object`, or `None` if absent.
pub fn get_nested_value<'v>(path: impl Into<Path>, object: &'v Value) -> Option<&'v Value> {
    path.into().resolve(object)
}

/// Returns `true` if `path` resolves to a value inside `object`.
pub fn has_nested_value(path: impl Into<Path>, object: &Value) -> bool {
    get_nested_value(path, object).is_some()
}
