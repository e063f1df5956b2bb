//! Recently inserted characters.

use serde::{Deserialize, Serialize};

/// How many characters are remembered by default.
pub const DEFAULT_RECENT_CAPACITY: usize = 20;

/// Most-recently-used list of inserted characters.
///
/// The newest character comes first. Inserting a character already in the
/// list moves it to the front instead of duplicating it, and the oldest
/// entry is dropped once the list is full.
///
/// ```
/// use phonedit_ipa::RecentCharacters;
///
/// let mut recent = RecentCharacters::new();
/// recent.push("ʃ");
/// recent.push("ə");
/// recent.push("ʃ");
/// assert_eq!(recent.iter().collect::<Vec<_>>(), vec!["ʃ", "ə"]);
/// ```
///
/// Serialized as a plain JSON array, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecentCharacters {
    characters: Vec<String>,
    capacity: usize,
}

impl Default for RecentCharacters {
    fn default() -> Self {
        RecentCharacters::with_capacity(DEFAULT_RECENT_CAPACITY)
    }
}

impl RecentCharacters {
    pub fn new() -> Self {
        RecentCharacters::default()
    }

    /// Creates a list remembering at most `capacity` characters.
    pub fn with_capacity(capacity: usize) -> Self {
        RecentCharacters {
            characters: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a use of `character`.
    pub fn push(&mut self, character: impl Into<String>) {
        let character = character.into();
        self.characters.retain(|existing| *existing != character);
        self.characters.insert(0, character);
        self.characters.truncate(self.capacity);
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.characters.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.characters.clear();
    }
}

impl From<Vec<String>> for RecentCharacters {
    fn from(mut characters: Vec<String>) -> Self {
        characters.truncate(DEFAULT_RECENT_CAPACITY);
        RecentCharacters {
            characters,
            capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

impl From<RecentCharacters> for Vec<String> {
    fn from(recent: RecentCharacters) -> Self {
        recent.characters
    }
}
