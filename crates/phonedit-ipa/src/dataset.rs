//! The unified IPA dataset.
//!
//! One JSON document holds everything the editor knows about characters:
//! the feature vocabularies, every phone with its articulatory features,
//! and the combining marks (combiners) that modify them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{read_json, Result};

/// Feature name to feature value, e.g. `height` to `"close"`.
///
/// Values are JSON so that a missing feature (`null`) and a flag such as
/// `nasal` (`false`) keep their original shape.
pub type Features = BTreeMap<String, Value>;

/// What kind of character an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Vowel,
    Consonant,
    Combiner,
}

impl CharacterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CharacterKind::Vowel => "vowel",
            CharacterKind::Consonant => "consonant",
            CharacterKind::Combiner => "combiner",
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A phone or combiner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// The character itself, e.g. `"ʃ"`.
    pub letter: String,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
    /// Articulatory features. Combiners have none.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: Features,
    #[serde(default)]
    pub name: String,
    /// Typed spellings, e.g. `"sh"` or `"vl postalveolar fricative"`.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Character {
    /// Returns the feature value as text, if the feature is set.
    ///
    /// `null` and `false` count as unset.
    pub fn feature_text(&self, name: &str) -> Option<String> {
        self.features.get(name).and_then(value_text)
    }
}

/// Text form of a feature value, or `None` for falsy values.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// The vocabularies each feature is drawn from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureLists {
    #[serde(default)]
    pub rounding: Vec<String>,
    #[serde(default)]
    pub heights: Vec<String>,
    #[serde(default)]
    pub backness: Vec<String>,
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub manners: Vec<String>,
    #[serde(default)]
    pub voicings: Vec<String>,
}

impl FeatureLists {
    /// Returns each vocabulary under its list name, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [
            ("rounding", self.rounding.as_slice()),
            ("heights", self.heights.as_slice()),
            ("backness", self.backness.as_slice()),
            ("places", self.places.as_slice()),
            ("manners", self.manners.as_slice()),
            ("voicings", self.voicings.as_slice()),
        ]
        .into_iter()
    }
}

/// The whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Free-form description of the data's origin.
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub features: FeatureLists,
    #[serde(default)]
    pub phones: Vec<Character>,
    #[serde(default)]
    pub combiners: Vec<Character>,
}

impl Dataset {
    /// Parses a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let dataset: Dataset = read_json(path)?;
        log::debug!(
            "loaded {} phones and {} combiners from {}",
            dataset.phones.len(),
            dataset.combiners.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Serializes the dataset as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Iterates over phones, then combiners.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.phones.iter().chain(&self.combiners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> Value {
        json!({
            "metadata": {"title": "sample"},
            "features": {
                "rounding": ["unrounded", "rounded"],
                "heights": ["close", "open"],
                "places": ["bilabial", "postalveolar"]
            },
            "phones": [
                {
                    "letter": "i",
                    "type": "vowel",
                    "features": {"height": "close", "backness": "front", "rounding": "unrounded", "nasal": false},
                    "name": "close front unrounded vowel",
                    "aliases": ["i"]
                },
                {
                    "letter": "ʃ",
                    "type": "consonant",
                    "features": {"place": "postalveolar", "manner": "fricative", "voicing": "voiceless"},
                    "name": "voiceless postalveolar fricative",
                    "aliases": ["sh", "esh"]
                }
            ],
            "combiners": [
                {"letter": "\u{0303}", "type": "combiner", "name": "~", "aliases": ["~"]}
            ]
        })
    }

    #[test]
    fn deserializes_unified_json() {
        let dataset: Dataset = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(dataset.phones.len(), 2);
        assert_eq!(dataset.phones[1].kind, CharacterKind::Consonant);
        assert_eq!(dataset.combiners[0].kind, CharacterKind::Combiner);
        assert!(dataset.combiners[0].features.is_empty());
        assert_eq!(dataset.features.heights, vec!["close", "open"]);
        assert!(dataset.features.voicings.is_empty());
    }

    #[test]
    fn combiners_serialize_without_features() {
        let dataset: Dataset = serde_json::from_value(sample_json()).unwrap();
        let value = serde_json::to_value(&dataset.combiners[0]).unwrap();
        assert!(value.get("features").is_none());
        assert_eq!(value["type"], "combiner");
    }

    #[test]
    fn feature_text_skips_falsy_values() {
        let dataset: Dataset = serde_json::from_value(sample_json()).unwrap();
        let vowel = &dataset.phones[0];
        assert_eq!(vowel.feature_text("height").as_deref(), Some("close"));
        assert_eq!(vowel.feature_text("nasal"), None);
        assert_eq!(vowel.feature_text("place"), None);
        assert_eq!(value_text(&json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn characters_lists_phones_first() {
        let dataset: Dataset = serde_json::from_value(sample_json()).unwrap();
        let letters: Vec<&str> = dataset.characters().map(|c| c.letter.as_str()).collect();
        assert_eq!(letters, vec!["i", "ʃ", "\u{0303}"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();
        let dataset = Dataset::from_file(file.path()).unwrap();
        assert_eq!(dataset.phones[0].letter, "i");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::from_file("/nonexistent/unified_ipa.json").unwrap_err();
        assert!(matches!(err, crate::IpaError::Io { .. }));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"phones\": 3}}").unwrap();
        let err = Dataset::from_file(file.path()).unwrap_err();
        assert!(matches!(err, crate::IpaError::Parse { .. }));
    }
}
