//! Building the unified dataset from the legacy sources.
//!
//! The legacy inventory (`ipa.json`) lists vowels and consonants with their
//! features flattened onto each phone, and keeps the feature vocabularies at
//! the top level. The alias table (`aliases.json`) is a list of
//! `[alias, character]` pairs, some aliases wrapped in braces. [`unify`]
//! folds both into one [`Dataset`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::dataset::{Character, CharacterKind, Dataset, FeatureLists, Features};
use crate::error::{read_json, Result};

/// A vowel as listed in the legacy inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyVowel {
    pub letter: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub backness: Option<String>,
    #[serde(default)]
    pub rounding: Option<String>,
    #[serde(default)]
    pub nasal: Option<bool>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A consonant as listed in the legacy inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyConsonant {
    pub letter: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub manner: Option<String>,
    #[serde(default)]
    pub voicing: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyPhones {
    #[serde(default)]
    pub vowels: Vec<LegacyVowel>,
    #[serde(default)]
    pub consonants: Vec<LegacyConsonant>,
}

/// The legacy `ipa.json` inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyInventory {
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub phones: LegacyPhones,
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

/// One `[alias, character]` row of the alias table.
pub type AliasRow = (String, String);

/// Removes one leading `{` and one trailing `}`.
pub fn clean_alias(alias: &str) -> &str {
    let alias = alias.strip_prefix('{').unwrap_or(alias);
    alias.strip_suffix('}').unwrap_or(alias)
}

/// Aliases grouped by character, in order of each character's first row.
fn group_aliases(rows: &[AliasRow]) -> Vec<(&str, Vec<String>)> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (alias, character) in rows {
        let position = *positions.entry(character.as_str()).or_insert_with(|| {
            groups.push((character.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[position].1.push(clean_alias(alias).to_string());
    }

    groups
}

fn feature(value: Option<&str>) -> Value {
    match value {
        Some(text) if !text.is_empty() => Value::from(text),
        _ => Value::Null,
    }
}

/// Folds the legacy inventory and alias table into a unified dataset.
///
/// Vowels come first, then consonants, each in inventory order. Every alias
/// whose character is not a phone becomes part of a combiner, named after
/// its first alias.
pub fn unify(inventory: &LegacyInventory, aliases: &[AliasRow]) -> Dataset {
    let groups = group_aliases(aliases);
    let aliases_of = |letter: &str| -> Vec<String> {
        groups
            .iter()
            .find(|(character, _)| *character == letter)
            .map(|(_, aliases)| aliases.clone())
            .unwrap_or_default()
    };

    let vowels = inventory.phones.vowels.iter().map(|vowel| Character {
        letter: vowel.letter.clone(),
        kind: CharacterKind::Vowel,
        features: Features::from([
            ("height".to_string(), feature(vowel.height.as_deref())),
            ("backness".to_string(), feature(vowel.backness.as_deref())),
            ("rounding".to_string(), feature(vowel.rounding.as_deref())),
            ("nasal".to_string(), Value::Bool(vowel.nasal.unwrap_or(false))),
        ]),
        name: vowel.name.clone().unwrap_or_default(),
        aliases: aliases_of(&vowel.letter),
    });

    let consonants = inventory.phones.consonants.iter().map(|consonant| Character {
        letter: consonant.letter.clone(),
        kind: CharacterKind::Consonant,
        features: Features::from([
            ("place".to_string(), feature(consonant.place.as_deref())),
            ("manner".to_string(), feature(consonant.manner.as_deref())),
            ("voicing".to_string(), feature(consonant.voicing.as_deref())),
        ]),
        name: consonant.name.clone().unwrap_or_default(),
        aliases: aliases_of(&consonant.letter),
    });

    let phones: Vec<Character> = vowels.chain(consonants).collect();

    let combiners: Vec<Character> = groups
        .iter()
        .filter(|(character, _)| !phones.iter().any(|phone| phone.letter == *character))
        .map(|(character, aliases)| Character {
            letter: character.to_string(),
            kind: CharacterKind::Combiner,
            features: Features::new(),
            name: aliases.first().cloned().unwrap_or_default(),
            aliases: aliases.clone(),
        })
        .collect();

    log::debug!(
        "unified {} phones and {} combiners",
        phones.len(),
        combiners.len()
    );

    Dataset {
        metadata: inventory.metadata.clone().unwrap_or_else(|| {
            json!({
                "title": "International Phonetic Alphabet - Unified",
                "source": "Merged from ipa.json and aliases.json"
            })
        }),
        features: FeatureLists {
            rounding: inventory.rounding.clone(),
            heights: inventory.heights.clone(),
            backness: inventory.backness.clone(),
            places: inventory.places.clone(),
            manners: inventory.manners.clone(),
            voicings: inventory.voicings.clone(),
        },
        phones,
        combiners,
    }
}

/// Reads both legacy files and unifies them.
pub fn unify_files(inventory: impl AsRef<Path>, aliases: impl AsRef<Path>) -> Result<Dataset> {
    let inventory: LegacyInventory = read_json(inventory.as_ref())?;
    let aliases: Vec<AliasRow> = read_json(aliases.as_ref())?;
    Ok(unify(&inventory, &aliases))
}
