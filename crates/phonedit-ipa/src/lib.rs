//! Phonedit IPA - Character data, search and substitution for the phonetic
//! editor.
//!
//! This crate holds everything the editor knows about the International
//! Phonetic Alphabet:
//!
//! - [`Dataset`]: phones, combining marks and feature vocabularies
//! - [`merge`]: building the unified dataset from the legacy sources
//! - [`IpaDatabase`]: alias, feature, token and anywhere search
//! - [`RuleSet`]: ASCII shorthand substitution, with built-in rule sets
//! - [`RecentCharacters`] and [`EditorState`]: what the editor remembers
//!
//! Feature and anywhere searches run through [`phonedit_match`].
//!
//! # Example
//!
//! ```rust
//! use phonedit_ipa::{Dataset, IpaDatabase, RuleSet};
//!
//! let dataset = Dataset::from_json_str(r#"{
//!     "phones": [{
//!         "letter": "ʃ",
//!         "type": "consonant",
//!         "features": {"place": "postalveolar", "manner": "fricative", "voicing": "voiceless"},
//!         "name": "voiceless postalveolar fricative",
//!         "aliases": ["sh"]
//!     }]
//! }"#).unwrap();
//! let db = IpaDatabase::new(dataset).unwrap();
//!
//! assert_eq!(db.search_by_alias("SH")[0].letter, "ʃ");
//! assert_eq!(db.search_by_features([("manner", "fricative")]).len(), 1);
//!
//! let rules = RuleSet::builtin("ipa-basic").unwrap();
//! assert_eq!(rules.apply("{sh}ip"), "ʃip");
//! ```

mod dataset;
mod db;
mod error;
pub mod merge;
mod recent;
mod state;
mod substitution;

pub use dataset::{Character, CharacterKind, Dataset, FeatureLists, Features};
pub use db::{parse_search_query, IndexEntry, IpaDatabase};
pub use error::{IpaError, Result};
pub use recent::{RecentCharacters, DEFAULT_RECENT_CAPACITY};
pub use state::EditorState;
pub use substitution::{apply_substitutions, Rule, RuleSet, BUILTIN_RULE_SETS};
