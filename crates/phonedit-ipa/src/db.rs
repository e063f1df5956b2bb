//! Searching the dataset.
//!
//! [`IpaDatabase`] owns a [`Dataset`] together with a flat search index that
//! has one entry per character name and one per alias. Four kinds of search
//! run over it:
//!
//! - alias search: substring match over names and aliases
//! - feature search: phones whose features equal every given criterion
//! - token search: free text, every token must hit the character somewhere
//! - anywhere search: an existential query over the phone records

use std::path::Path;

use phonedit_match::{Query, Search};
use serde::Serialize;
use serde_json::Value;

use crate::dataset::{value_text, Character, CharacterKind, Dataset, FeatureLists, Features};
use crate::error::Result;

/// One searchable spelling of a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub letter: String,
    /// Lowercased name or alias, the text searched against.
    pub search_text: String,
    #[serde(rename = "type")]
    pub kind: CharacterKind,
    /// The name or alias as written.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

impl IndexEntry {
    fn new(character: &Character, name: &str) -> Self {
        IndexEntry {
            letter: character.letter.clone(),
            search_text: name.to_lowercase(),
            kind: character.kind,
            name: name.to_string(),
            features: match character.kind {
                CharacterKind::Combiner => None,
                _ => Some(character.features.clone()),
            },
        }
    }
}

/// The dataset plus its search structures.
#[derive(Debug, Clone)]
pub struct IpaDatabase {
    dataset: Dataset,
    index: Vec<IndexEntry>,
    // JSON form of each phone, for the match engine.
    records: Vec<Value>,
}

impl IpaDatabase {
    /// Indexes a dataset.
    pub fn new(dataset: Dataset) -> Result<Self> {
        let index: Vec<IndexEntry> = dataset
            .characters()
            .flat_map(|character| {
                std::iter::once(IndexEntry::new(character, &character.name)).chain(
                    character
                        .aliases
                        .iter()
                        .map(move |alias| IndexEntry::new(character, alias)),
                )
            })
            .collect();

        let records = dataset
            .phones
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;

        log::debug!("built search index with {} entries", index.len());

        Ok(IpaDatabase {
            dataset,
            index,
            records,
        })
    }

    /// Loads and indexes a unified dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        IpaDatabase::new(Dataset::from_file(path)?)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn features(&self) -> &FeatureLists {
        &self.dataset.features
    }

    pub fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    /// Finds index entries whose name or alias contains `query`.
    ///
    /// Matching ignores case and surrounding whitespace. A blank query finds
    /// nothing.
    pub fn search_by_alias(&self, query: &str) -> Vec<&IndexEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.index
            .iter()
            .filter(|entry| entry.search_text.contains(&query))
            .collect()
    }

    /// Finds phones whose features equal every criterion.
    ///
    /// Criteria with an empty value are ignored, so an empty form selects
    /// every phone.
    pub fn search_by_features<I, K, V>(&self, criteria: I) -> Vec<&Character>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = criteria
            .into_iter()
            .filter(|(_, value)| !value.as_ref().is_empty())
            .fold(Query::new(), |query, (feature, value)| {
                query.and_eq(["features", feature.as_ref()], value.as_ref())
            })
            .build();

        self.phones_where(|record| query.matches(record))
    }

    /// Finds phones and combiners hit by every token.
    ///
    /// A token hits a character when it occurs in its name, one of its
    /// aliases, or one of its feature values, or when it is the letter
    /// itself. No tokens, no results.
    pub fn search_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<&Character> {
        if tokens.is_empty() {
            return Vec::new();
        }
        self.dataset
            .characters()
            .filter(|character| {
                tokens
                    .iter()
                    .all(|token| self.token_hits(character, token.as_ref()))
            })
            .collect()
    }

    /// Tokenizes `query` with [`parse_search_query`] and runs a token search.
    pub fn search(&self, query: &str) -> Vec<&Character> {
        self.search_tokens(&parse_search_query(query))
    }

    /// Finds phones that satisfy `search` anywhere in their record.
    pub fn search_anywhere(&self, search: &Search) -> Vec<&Character> {
        self.phones_where(|record| search.matches(record))
    }

    /// Finds phones whose record satisfies a structural query.
    pub fn search_matching(&self, query: &phonedit_match::QueryInput) -> Vec<&Character> {
        self.phones_where(|record| query.matches(record))
    }

    /// Looks up a character by its letter, phones first.
    pub fn phone_by_letter(&self, letter: &str) -> Option<&Character> {
        self.dataset
            .characters()
            .find(|character| character.letter == letter)
    }

    fn phones_where(&self, mut predicate: impl FnMut(&Value) -> bool) -> Vec<&Character> {
        self.dataset
            .phones
            .iter()
            .zip(&self.records)
            .filter(|&(_, record)| predicate(record))
            .map(|(phone, _)| phone)
            .collect()
    }

    fn token_hits(&self, character: &Character, token: &str) -> bool {
        if character.name.to_lowercase().contains(token) {
            return true;
        }

        if character
            .aliases
            .iter()
            .any(|alias| alias.to_lowercase().contains(token))
        {
            return true;
        }

        if !character.features.is_empty() {
            let in_values = character
                .features
                .values()
                .filter_map(value_text)
                .any(|text| text.to_lowercase().contains(token));
            if in_values {
                return true;
            }

            // A vocabulary value containing the token, held under the
            // vocabulary's own name.
            let in_vocabulary = self.dataset.features.iter().any(|(list, values)| {
                values
                    .iter()
                    .find(|value| value.to_lowercase().contains(token))
                    .is_some_and(|value| {
                        character.features.get(list).and_then(Value::as_str) == Some(value.as_str())
                    })
            });
            if in_vocabulary {
                return true;
            }
        }

        character.letter.to_lowercase() == token
    }
}

/// Splits free text into lowercase search tokens.
///
/// Tokens are separated by spaces. Double quotes group a phrase into one
/// token and are themselves dropped; an unbalanced quote runs to the end.
///
/// ```
/// use phonedit_ipa::parse_search_query;
///
/// assert_eq!(
///     parse_search_query(r#"Voiceless "bilabial stop""#),
///     vec!["voiceless", "bilabial stop"]
/// );
/// ```
pub fn parse_search_query(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in query.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            other => current.push(other),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.into_iter().map(|token| token.to_lowercase()).collect()
}
