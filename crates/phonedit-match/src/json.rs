//! Queries as JSON documents.
//!
//! A query arriving as JSON can take any of the shapes [`QueryInput`]
//! describes: a bare value, a `{"path": .., "value": ..}` descriptor, a plain
//! mapping, or a list of descriptors and `[path, value, options]` tuples.
//!
//! Two conversions are offered. `From<Value>` reads the document as plain
//! data and cannot fail. `from_json` additionally recognises value markers
//! that JSON cannot otherwise express:
//!
//! | Marker | Becomes |
//! |--------|---------|
//! | `{"$regex": "^p", "$flags": "i"}` | [`Matcher::Pattern`] |
//! | `{"$type": "string"}` | [`Matcher::Type`] |
//!
//! Markers are only read where a matcher is expected, so a mapping key
//! spelled `$type` at the top of a query is still a path.

use std::convert::Infallible;

use regex::RegexBuilder;
use serde_json::{Map, Value};

use crate::descriptor::{Descriptor, QueryInput, QueryItem, TupleOptions};
use crate::error::{MatchError, Result};
use crate::matcher::Matcher;
use crate::path::Path;
use crate::search::Search;
use crate::strategy::ArrayMatch;
use crate::value::truthy;

const REGEX_MARKER: &str = "$regex";
const FLAGS_MARKER: &str = "$flags";
const TYPE_MARKER: &str = "$type";

/// Reads the special value markers out of an object, if it is one.
trait Markers {
    type Error;

    fn marker(&self, object: &Map<String, Value>) -> Parsed<Option<Matcher>, Self>;
}

type Parsed<T, M> = std::result::Result<T, <M as Markers>::Error>;

/// Plain data: no markers.
struct Plain;

impl Markers for Plain {
    type Error = Infallible;

    fn marker(&self, _: &Map<String, Value>) -> std::result::Result<Option<Matcher>, Infallible> {
        Ok(None)
    }
}

/// `$regex` and `$type` markers.
struct Marked;

impl Markers for Marked {
    type Error = MatchError;

    fn marker(&self, object: &Map<String, Value>) -> Result<Option<Matcher>> {
        if let Some(pattern) = object.get(REGEX_MARKER) {
            let pattern = pattern.as_str().ok_or(MatchError::InvalidMarker {
                marker: REGEX_MARKER,
            })?;
            let flags = match object.get(FLAGS_MARKER) {
                None => "",
                Some(flags) => flags.as_str().ok_or(MatchError::InvalidMarker {
                    marker: FLAGS_MARKER,
                })?,
            };
            return Ok(Some(Matcher::Pattern(compile(pattern, flags)?)));
        }

        if let Some(name) = object.get(TYPE_MARKER) {
            let name = name.as_str().ok_or(MatchError::InvalidMarker {
                marker: TYPE_MARKER,
            })?;
            return Ok(Some(Matcher::Type(name.parse()?)));
        }

        Ok(None)
    }
}

fn compile(pattern: &str, flags: &str) -> Result<regex::Regex> {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'u' => builder.unicode(true),
            other => {
                log::trace!("ignoring unsupported regex flag '{}'", other);
                &mut builder
            }
        };
    }
    Ok(builder.build()?)
}

fn never<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

// Query documents

fn query_input<M: Markers>(markers: &M, value: &Value) -> Parsed<QueryInput, M> {
    Ok(match value {
        Value::Array(items) => QueryInput::List(query_items(markers, items)?),
        Value::Object(object) if is_descriptor(object) => match descriptor(markers, object)? {
            QueryItem::Descriptor(descriptor) => QueryInput::Descriptor(descriptor),
            other => QueryInput::List(vec![other]),
        },
        Value::Object(object) => QueryInput::Mapping(mapping(markers, object)?),
        primitive => QueryInput::Primitive(primitive.clone()),
    })
}

fn query_items<M: Markers>(markers: &M, items: &[Value]) -> Parsed<Vec<QueryItem>, M> {
    items.iter().map(|item| query_item(markers, item)).collect()
}

fn query_item<M: Markers>(markers: &M, item: &Value) -> Parsed<QueryItem, M> {
    match item {
        Value::Array(tuple) if tuple.len() >= 2 => {
            let Some(path) = path(&tuple[0]) else {
                return Ok(QueryItem::Malformed);
            };
            let empty = Map::new();
            let options = match tuple.get(2) {
                Some(Value::Object(options)) => options,
                _ => &empty,
            };
            let recursive = is_recursive(options);
            Ok(QueryItem::Tuple {
                path,
                value: matcher_value(markers, &tuple[1], recursive)?,
                options: TupleOptions {
                    array_match: array_match(options),
                    recursive,
                },
            })
        }
        Value::Object(object) if is_descriptor(object) => descriptor(markers, object),
        _ => Ok(QueryItem::Malformed),
    }
}

fn is_descriptor(object: &Map<String, Value>) -> bool {
    object.contains_key("path") && object.contains_key("value")
}

fn descriptor<M: Markers>(markers: &M, object: &Map<String, Value>) -> Parsed<QueryItem, M> {
    let Some(path) = object.get("path").and_then(path) else {
        return Ok(QueryItem::Malformed);
    };
    let recursive = is_recursive(object);
    let value = match object.get("value") {
        Some(value) => matcher_value(markers, value, recursive)?,
        None => return Ok(QueryItem::Malformed),
    };
    Ok(QueryItem::Descriptor(Descriptor {
        path,
        value,
        array_match: array_match(object),
        recursive,
    }))
}

fn mapping<M: Markers>(
    markers: &M,
    object: &Map<String, Value>,
) -> Parsed<Vec<(Path, Matcher)>, M> {
    object
        .iter()
        .map(|(key, value)| {
            let value: Parsed<Matcher, M> = matcher(markers, value);
            value.map(|value| (Path::parse(key), value))
        })
        .collect()
}

/// Strings are dotted paths, numbers a single key, arrays a key list.
fn path(value: &Value) -> Option<Path> {
    match value {
        Value::String(dotted) => Some(Path::parse(dotted)),
        Value::Number(n) => Some(Path::new([n.to_string()])),
        Value::Array(keys) => Some(Path::new(keys.iter().map(|key| match key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))),
        _ => None,
    }
}

fn array_match(options: &Map<String, Value>) -> Option<ArrayMatch> {
    match options.get("arrayMatch") {
        Some(Value::String(name)) if !name.is_empty() => Some(ArrayMatch::parse(name)),
        Some(other) if truthy(other) => Some(ArrayMatch::Other(other.to_string())),
        _ => None,
    }
}

fn is_recursive(options: &Map<String, Value>) -> bool {
    options.get("queryType").and_then(Value::as_str) == Some("conditions")
        || options.get("isQuery").is_some_and(truthy)
}

fn matcher_value<M: Markers>(
    markers: &M,
    value: &Value,
    recursive: bool,
) -> Parsed<Matcher, M> {
    match value {
        Value::Array(items) if recursive => Ok(Matcher::Conditions(query_items(markers, items)?)),
        other => matcher(markers, other),
    }
}

fn matcher<M: Markers>(markers: &M, value: &Value) -> Parsed<Matcher, M> {
    match value {
        Value::Object(object) => match markers.marker(object)? {
            Some(marker) => Ok(marker),
            None => Ok(Matcher::query(query_input(markers, value)?)),
        },
        other => Ok(Matcher::Literal(other.clone())),
    }
}

// Search documents

fn search<M: Markers>(markers: &M, value: &Value) -> Parsed<Search, M> {
    Ok(match value {
        Value::Array(items) => Search::Any(
            items
                .iter()
                .map(|item| search(markers, item))
                .collect::<std::result::Result<_, _>>()?,
        ),
        Value::Object(object) => match markers.marker(object)? {
            Some(Matcher::Pattern(regex)) => Search::Pattern(regex),
            Some(marker) => Search::Value {
                value: marker,
                array_match: None,
            },
            None => match object.get("value") {
                Some(value) => Search::Value {
                    value: matcher(markers, value)?,
                    array_match: array_match(object),
                },
                None => Search::Mapping(mapping(markers, object)?),
            },
        },
        primitive => Search::Literal(primitive.clone()),
    })
}

impl From<Value> for QueryInput {
    fn from(value: Value) -> Self {
        never(query_input(&Plain, &value))
    }
}

impl From<&Value> for QueryInput {
    fn from(value: &Value) -> Self {
        never(query_input(&Plain, value))
    }
}

impl QueryInput {
    /// Reads a query document, honouring `$regex` and `$type` markers.
    ///
    /// # Errors
    ///
    /// Fails on an invalid pattern, an unknown type name, or a marker whose
    /// operand is not a string. Structural problems are not errors: they
    /// become [`QueryItem::Malformed`] and simply never match.
    ///
    /// # Example
    ///
    /// ```
    /// use phonedit_match::QueryInput;
    /// use serde_json::json;
    ///
    /// let query = QueryInput::from_json(&json!([
    ///     ["features.height", {"$regex": "^close"}],
    ///     {"path": "letter", "value": {"$type": "string"}}
    /// ])).unwrap();
    ///
    /// assert!(query.matches(&json!({"letter": "i", "features": {"height": "close"}})));
    /// ```
    pub fn from_json(value: &Value) -> Result<Self> {
        query_input(&Marked, value)
    }
}

impl From<Value> for Search {
    fn from(value: Value) -> Self {
        never(search(&Plain, &value))
    }
}

impl Search {
    /// Reads a search document, honouring `$regex` and `$type` markers.
    ///
    /// A top-level `$regex` marker searches string leaves, like
    /// [`Search::Pattern`].
    pub fn from_json(value: &Value) -> Result<Self> {
        search(&Marked, value)
    }
}

impl Matcher {
    /// Reads a single query value, honouring `$regex` and `$type` markers.
    pub fn from_json(value: &Value) -> Result<Self> {
        matcher(&Marked, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::TypeTag;
    use serde_json::json;

    #[test]
    fn primitive_document() {
        assert!(matches!(
            QueryInput::from(json!("gato")),
            QueryInput::Primitive(Value::String(s)) if s == "gato"
        ));
    }

    #[test]
    fn descriptor_document() {
        let query = QueryInput::from(json!({"path": "a.b", "value": 1, "arrayMatch": "every"}));
        let QueryInput::Descriptor(descriptor) = query else {
            panic!("expected a descriptor");
        };
        assert_eq!(descriptor.path, Path::from("a.b"));
        assert_eq!(descriptor.array_match, Some(ArrayMatch::Every));
        assert!(!descriptor.recursive);
    }

    #[test]
    fn mapping_document() {
        let query = QueryInput::from(json!({"form": "gato", "gloss": "cat"}));
        let QueryInput::Mapping(entries) = query else {
            panic!("expected a mapping");
        };
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn tuple_shapes() {
        let query = QueryInput::from(json!([
            ["form", "gato"],
            ["tags", "egyptian", {"arrayMatch": "includes"}],
            ["short"],
            {"path": "only"},
            42
        ]));
        let QueryInput::List(items) = query else {
            panic!("expected a list");
        };
        assert!(matches!(items[0], QueryItem::Tuple { .. }));
        assert!(matches!(
            &items[1],
            QueryItem::Tuple { options, .. } if options.array_match == Some(ArrayMatch::Includes)
        ));
        assert!(matches!(items[2], QueryItem::Malformed));
        assert!(matches!(items[3], QueryItem::Malformed));
        assert!(matches!(items[4], QueryItem::Malformed));
    }

    #[test]
    fn numeric_and_list_paths() {
        let query = QueryInput::from(json!([[0, "first"], [["dotted.key"], 1]]));
        assert!(query.matches(&json!({"0": "first", "dotted.key": 1})));
        let bad = QueryInput::from(json!([[true, "x"]]));
        assert!(!bad.matches(&json!({"true": "x"})));
    }

    #[test]
    fn recursive_flags() {
        let data = json!({"meta": {"type": "uniliteral", "phonetic": "a"}});
        let conditions = json!([["type", "uniliteral"], ["phonetic", "a"]]);

        let by_type = json!([{"path": "meta", "value": conditions, "queryType": "conditions"}]);
        assert!(QueryInput::from(by_type).matches(&data));

        let by_flag = json!([["meta", conditions, {"isQuery": true}]]);
        assert!(QueryInput::from(by_flag).matches(&data));

        let neither = json!([["meta", conditions]]);
        assert!(!QueryInput::from(neither).matches(&data));
    }

    #[test]
    fn truthy_non_string_strategy_never_matches() {
        let query = QueryInput::from(json!([["tags", "a", {"arrayMatch": 1}]]));
        assert!(!query.matches(&json!({"tags": ["a"]})));
        let falsy = QueryInput::from(json!([["tags", ["a"], {"arrayMatch": ""}]]));
        assert!(falsy.matches(&json!({"tags": ["a"]})));
    }

    #[test]
    fn plain_conversion_keeps_markers_as_data() {
        let query = QueryInput::from(json!({"letter": {"$type": "string"}}));
        assert!(query.matches(&json!({"letter": {"$type": "string"}})));
        assert!(!query.matches(&json!({"letter": "p"})));
    }

    #[test]
    fn regex_marker() {
        let m = Matcher::from_json(&json!({"$regex": "^SPRING", "$flags": "i"})).unwrap();
        assert!(m.evaluate(&json!("Springfield")));
    }

    #[test]
    fn type_marker() {
        let m = Matcher::from_json(&json!({"$type": "number"})).unwrap();
        assert!(matches!(m, Matcher::Type(TypeTag::Number)));
    }

    #[test]
    fn marker_errors() {
        assert!(matches!(
            Matcher::from_json(&json!({"$regex": "("})),
            Err(MatchError::InvalidRegex(_))
        ));
        assert!(matches!(
            Matcher::from_json(&json!({"$type": "date"})),
            Err(MatchError::UnknownType(_))
        ));
        assert!(matches!(
            Matcher::from_json(&json!({"$type": 3})),
            Err(MatchError::InvalidMarker { marker: "$type" })
        ));
    }

    #[test]
    fn nested_markers() {
        let query = QueryInput::from_json(&json!({
            "features": {"height": {"$regex": "close"}, "rounding": "rounded"}
        }))
        .unwrap();
        assert!(query.matches(&json!({"features": {"height": "near-close", "rounding": "rounded"}})));
        assert!(!query.matches(&json!({"features": {"height": "open", "rounding": "rounded"}})));
    }

    #[test]
    fn search_documents() {
        let data = json!({"address": {"city": "Springfield"}});
        assert!(Search::from(json!("Springfield")).matches(&data));
        assert!(Search::from_json(&json!({"$regex": "^Spring"})).unwrap().matches(&data));
        assert!(Search::from(json!(["Chicago", "Springfield"])).matches(&data));
        assert!(Search::from(json!({"anything": "Springfield"})).matches(&data));

        let tagged = json!({"items": [{"tags": ["important", "new"]}]});
        let includes = Search::from(json!({"value": "important", "arrayMatch": "includes"}));
        assert!(includes.matches(&tagged));
    }
}
