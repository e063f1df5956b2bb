//! Query builder and executor.
//!
//! The [`Query`] struct provides a fluent builder API for constructing
//! condition lists and methods for running them over collections of JSON
//! records.

use serde_json::Value;

use crate::descriptor::{Descriptor, QueryInput, QueryItem};
use crate::error::Result;
use crate::kind::{InstanceTag, TypeTag};
use crate::matcher::Matcher;
use crate::matching::matches_items;
use crate::path::Path;
use crate::strategy::ArrayMatch;

/// A list of conditions, all of which a record must satisfy.
///
/// # Example
///
/// ```
/// use phonedit_match::{Query, TypeTag};
/// use serde_json::json;
///
/// let phones = vec![
///     json!({"letter": "p", "features": {"place": "bilabial", "voicing": "voiceless"}}),
///     json!({"letter": "b", "features": {"place": "bilabial", "voicing": "voiced"}}),
///     json!({"letter": "t", "features": {"place": "alveolar", "voicing": "voiceless"}}),
/// ];
///
/// let query = Query::new()
///     .and_eq("features.place", "bilabial")
///     .and_type("letter", TypeTag::String)
///     .limit(1)
///     .build();
///
/// let results = query.filter(&phones);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0]["letter"], "p");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    items: Vec<QueryItem>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches every non-null record.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Condition builders
    // ========================================================================

    /// Adds a descriptor as-is.
    pub fn descriptor(mut self, descriptor: Descriptor) -> Self {
        self.items.push(QueryItem::Descriptor(descriptor));
        self
    }

    /// Adds an equality condition.
    ///
    /// The value may be anything convertible to a [`Matcher`], so literals,
    /// compiled regexes and type tags all work here.
    pub fn and_eq(self, path: impl Into<Path>, value: impl Into<Matcher>) -> Self {
        self.descriptor(Descriptor::new(path, value))
    }

    /// Adds a regex condition.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn and_regex(self, path: impl Into<Path>, pattern: &str) -> Result<Self> {
        Ok(self.and_eq(path, Matcher::pattern(pattern)?))
    }

    /// Adds a type condition.
    pub fn and_type(self, path: impl Into<Path>, tag: TypeTag) -> Self {
        self.and_eq(path, tag)
    }

    /// Adds a nominal type condition.
    pub fn and_instance(self, path: impl Into<Path>, tag: InstanceTag) -> Self {
        self.and_eq(path, tag)
    }

    /// Adds a condition that some element of the array at `path` satisfies.
    pub fn and_some(self, path: impl Into<Path>, value: impl Into<Matcher>) -> Self {
        self.descriptor(Descriptor::new(path, value).with_array_match(ArrayMatch::Some))
    }

    /// Adds a condition that every element of the array at `path` satisfies.
    pub fn and_every(self, path: impl Into<Path>, value: impl Into<Matcher>) -> Self {
        self.descriptor(Descriptor::new(path, value).with_array_match(ArrayMatch::Every))
    }

    /// Adds a literal membership condition on the array at `path`.
    pub fn and_includes(self, path: impl Into<Path>, value: impl Into<Value>) -> Self {
        self.descriptor(
            Descriptor::new(path, Matcher::Literal(value.into()))
                .with_array_match(ArrayMatch::Includes),
        )
    }

    /// Adds a nested query run against the value at `path`.
    pub fn and_where(self, path: impl Into<Path>, query: impl Into<QueryInput>) -> Self {
        self.and_eq(path, Matcher::query(query))
    }

    /// Adds a recursive condition list run against the value at `path`.
    pub fn and_conditions(self, path: impl Into<Path>, conditions: Vec<QueryItem>) -> Self {
        self.descriptor(Descriptor::new(path, Matcher::Conditions(conditions)).with_recursion())
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the maximum number of results to return.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets the number of results to skip.
    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the conditions, in evaluation order.
    pub fn items(&self) -> &[QueryItem] {
        &self.items
    }

    /// Returns the limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the offset, if set.
    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// Returns `true` if this query has no conditions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches this query.
    pub fn matches(&self, record: &Value) -> bool {
        matches_items(&self.items, record)
    }

    /// Filters a slice, returning references to matching records.
    ///
    /// Records keep their input order; offset and limit are applied last.
    pub fn filter<'a>(&self, records: &'a [Value]) -> Vec<&'a Value> {
        let matching = records.iter().filter(|record| self.matches(record));
        let skipped = matching.skip(self.offset.unwrap_or(0));
        match self.limit {
            Some(limit) => skipped.take(limit).collect(),
            None => skipped.collect(),
        }
    }

    /// Filters and clones matching records.
    pub fn filter_cloned(&self, records: &[Value]) -> Vec<Value> {
        self.filter(records).into_iter().cloned().collect()
    }

    /// Counts the number of matching records.
    pub fn count(&self, records: &[Value]) -> usize {
        records.iter().filter(|record| self.matches(record)).count()
    }

    /// Returns `true` if any record matches.
    pub fn any(&self, records: &[Value]) -> bool {
        records.iter().any(|record| self.matches(record))
    }

    /// Returns `true` if all records match.
    pub fn all(&self, records: &[Value]) -> bool {
        records.iter().all(|record| self.matches(record))
    }

    /// Finds the first matching record.
    pub fn find<'a>(&self, records: &'a [Value]) -> Option<&'a Value> {
        records.iter().find(|record| self.matches(record))
    }

    /// Finds the first matching record and returns its index.
    pub fn position(&self, records: &[Value]) -> Option<usize> {
        records.iter().position(|record| self.matches(record))
    }
}

impl From<Query> for QueryInput {
    fn from(query: Query) -> Self {
        QueryInput::List(query.items)
    }
}
