//! Phonedit Match - Structural query engine for JSON records.
//!
//! The engine answers one question: does a piece of nested data satisfy a
//! query? It backs every search surface of the phonetic editor, but knows
//! nothing about phones. It supports:
//!
//! - Path-anchored matching: dotted or key-list paths into nested values
//! - Value predicates: literals, regexes, type tags, nominal instance tags
//! - Nested and recursive queries
//! - Array strategies: `some`, `every`, `includes`
//! - Existential search at any depth
//!
//! # Quick Start
//!
//! ```rust
//! use phonedit_match::{matches, match_any, QueryInput, Search};
//! use serde_json::json;
//!
//! let sign = json!({
//!     "metadata": {"type": "uniliteral"},
//!     "tags": ["egyptian", "ancient"]
//! });
//!
//! let query = QueryInput::from(json!([
//!     ["metadata.type", "uniliteral"],
//!     ["tags", "egyptian", {"arrayMatch": "includes"}]
//! ]));
//! assert!(matches(&query, &sign));
//!
//! assert!(match_any(&Search::from("ancient"), &sign));
//! ```
//!
//! # Query Semantics
//!
//! A query is normalized into an ordered list of conditions before anything
//! is evaluated:
//!
//! ```text
//! match = comparand is not null
//!       ∧ (primitive query: query == comparand)
//!       ∨ (every condition holds at its path)
//! ```
//!
//! Evaluation never fails. A missing path, a malformed list element, an
//! unknown array strategy, or a null comparand each simply fail to match.
//!
//! # Matchers
//!
//! | Matcher | Holds when the candidate |
//! |---------|--------------------------|
//! | `Literal` | equals it ([`strict_eq`]); an object literal is a nested query |
//! | `Pattern` | is a string the regex finds a match in |
//! | `Type` | has that kind |
//! | `Instance` | passes the tag's predicate |
//! | `Query` | matches the nested query |
//! | `Conditions` | matches the list, for recursive descriptors only |

mod descriptor;
mod error;
mod json;
mod kind;
mod matcher;
mod matching;
mod path;
mod query;
mod search;
mod strategy;
mod value;

// Re-export public API
pub use descriptor::{normalize, Condition, Descriptor, Normalized, QueryInput, QueryItem, TupleOptions};
pub use error::{MatchError, Result};
pub use kind::{InstanceTag, TypeTag};
pub use matcher::{evaluate, Matcher};
pub use matching::matches;
pub use path::{get_nested_value, has_nested_value, Path};
pub use query::Query;
pub use search::{collect_paths, collect_values, match_any, Search};
pub use strategy::{match_array, ArrayMatch};
pub use value::strict_eq;
