//! Query shapes and their normalization.
//!
//! Callers hand the engine queries in several shapes: a single descriptor, a
//! plain key→value mapping, a list of descriptors, or a list of legacy
//! `[path, value, options]` tuples. [`QueryInput`] is the closed set of those
//! shapes, and [`normalize`] turns any of them into one ordered list of
//! [`Condition`]s before matching begins.

use serde_json::Value;

use crate::matcher::Matcher;
use crate::path::Path;
use crate::strategy::ArrayMatch;

/// Canonical single condition: the value at `path` must satisfy `value`.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Where to look in the comparand.
    pub path: Path,
    /// What the value found there must satisfy.
    pub value: Matcher,
    /// Strategy applied when the value found is an array.
    pub array_match: Option<ArrayMatch>,
    /// Treat a list `value` as a nested query list.
    pub recursive: bool,
}

impl Descriptor {
    /// Creates a descriptor without options.
    pub fn new(path: impl Into<Path>, value: impl Into<Matcher>) -> Self {
        Descriptor {
            path: path.into(),
            value: value.into(),
            array_match: None,
            recursive: false,
        }
    }

    /// Sets the array strategy.
    pub fn with_array_match(mut self, strategy: ArrayMatch) -> Self {
        self.array_match = Some(strategy);
        self
    }

    /// Marks the descriptor recursive.
    pub fn with_recursion(mut self) -> Self {
        self.recursive = true;
        self
    }

    fn condition(&self) -> Condition<'_> {
        Condition::Check {
            path: &self.path,
            value: &self.value,
            array_match: self.array_match.as_ref(),
            recursive: self.recursive,
        }
    }
}

/// Extra fields carried by the third element of a legacy tuple.
#[derive(Debug, Clone, Default)]
pub struct TupleOptions {
    /// Strategy applied when the value found is an array.
    pub array_match: Option<ArrayMatch>,
    /// Treat a list `value` as a nested query list.
    pub recursive: bool,
}

/// One element of a query list.
#[derive(Debug, Clone)]
pub enum QueryItem {
    /// Descriptor object.
    Descriptor(Descriptor),
    /// Legacy `[path, value]` or `[path, value, options]` tuple.
    Tuple {
        path: Path,
        value: Matcher,
        options: TupleOptions,
    },
    /// Element that is neither a descriptor nor a complete tuple.
    Malformed,
}

impl QueryItem {
    /// Creates a legacy tuple item without options.
    pub fn tuple(path: impl Into<Path>, value: impl Into<Matcher>) -> Self {
        QueryItem::Tuple {
            path: path.into(),
            value: value.into(),
            options: TupleOptions::default(),
        }
    }

    fn condition(&self) -> Condition<'_> {
        match self {
            QueryItem::Descriptor(descriptor) => descriptor.condition(),
            QueryItem::Tuple {
                path,
                value,
                options,
            } => Condition::Check {
                path,
                value,
                array_match: options.array_match.as_ref(),
                recursive: options.recursive,
            },
            QueryItem::Malformed => Condition::Unsatisfiable,
        }
    }
}

impl From<Descriptor> for QueryItem {
    fn from(descriptor: Descriptor) -> Self {
        QueryItem::Descriptor(descriptor)
    }
}

/// A query in any accepted shape.
#[derive(Debug, Clone)]
pub enum QueryInput {
    /// Bare value, compared with the whole comparand.
    Primitive(Value),
    /// Single descriptor.
    Descriptor(Descriptor),
    /// Plain mapping: every key is a path that must equal its value.
    Mapping(Vec<(Path, Matcher)>),
    /// List of descriptors and tuples, all of which must match.
    List(Vec<QueryItem>),
}

impl QueryInput {
    /// Returns `true` if the comparand satisfies this query.
    pub fn matches(&self, comparand: &Value) -> bool {
        crate::matching::matches(self, comparand)
    }

    /// Returns `true` if the query normalizes to no conditions at all.
    pub fn is_empty(&self) -> bool {
        match self {
            QueryInput::Primitive(_) | QueryInput::Descriptor(_) => false,
            QueryInput::Mapping(entries) => entries.is_empty(),
            QueryInput::List(items) => items.is_empty(),
        }
    }
}

impl From<Descriptor> for QueryInput {
    fn from(descriptor: Descriptor) -> Self {
        QueryInput::Descriptor(descriptor)
    }
}

impl From<Vec<QueryItem>> for QueryInput {
    fn from(items: Vec<QueryItem>) -> Self {
        QueryInput::List(items)
    }
}

impl From<Vec<Descriptor>> for QueryInput {
    fn from(descriptors: Vec<Descriptor>) -> Self {
        QueryInput::List(descriptors.into_iter().map(QueryItem::from).collect())
    }
}

/// A normalized condition, borrowing from the query it came from.
#[derive(Debug, Clone, Copy)]
pub enum Condition<'a> {
    /// The value at `path` must satisfy `value`.
    Check {
        path: &'a Path,
        value: &'a Matcher,
        array_match: Option<&'a ArrayMatch>,
        recursive: bool,
    },
    /// A malformed element. Never satisfied.
    Unsatisfiable,
}

/// Result of [`normalize`].
#[derive(Debug, Clone)]
pub enum Normalized<'a> {
    /// A bare value; matched by equality against the whole comparand.
    Primitive(&'a Value),
    /// Conditions that must all hold, in evaluation order.
    Conditions(Vec<Condition<'a>>),
}

/// Converts any query shape into its canonical form.
///
/// Mapping entries become one condition per key, in the mapping's order.
/// List elements keep their order; malformed elements become
/// [`Condition::Unsatisfiable`].
pub fn normalize(query: &QueryInput) -> Normalized<'_> {
    match query {
        QueryInput::Primitive(value) => Normalized::Primitive(value),
        QueryInput::Descriptor(descriptor) => Normalized::Conditions(vec![descriptor.condition()]),
        QueryInput::Mapping(entries) => Normalized::Conditions(
            entries
                .iter()
                .map(|(path, value)| Condition::Check {
                    path,
                    value,
                    array_match: None,
                    recursive: false,
                })
                .collect(),
        ),
        QueryInput::List(items) => Normalized::Conditions(normalize_items(items)),
    }
}

pub(crate) fn normalize_items(items: &[QueryItem]) -> Vec<Condition<'_>> {
    items.iter().map(QueryItem::condition).collect()
}
