//! Persisted editor state.
//!
//! The editor keeps its working text, active substitution rules and recent
//! characters between sessions in one JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{read_json, IpaError, Result};
use crate::recent::RecentCharacters;
use crate::substitution::RuleSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorState {
    pub current_text: String,
    pub substitution_rules: RuleSet,
    pub recent_characters: RecentCharacters,
}

impl EditorState {
    /// Loads state from `path`. A missing file yields the default state.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("no saved state at {}, starting fresh", path.display());
            return Ok(EditorState::default());
        }
        read_json(path)
    }

    /// Writes state to `path` as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| IpaError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::Rule;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let state = EditorState::load(dir.path().join("state.json")).unwrap();
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut state = EditorState {
            current_text: "{sh}ip".to_string(),
            ..EditorState::default()
        };
        state.substitution_rules.insert(Rule::new("{sh}", "ʃ"));
        state.recent_characters.push("ʃ");
        state.save(&path).unwrap();

        let loaded = EditorState::load(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn camel_case_keys() {
        let state: EditorState = serde_json::from_str(
            r#"{"currentText": "a", "recentCharacters": ["ə"], "substitutionRules": [["x", "y"]]}"#,
        )
        .unwrap();
        assert_eq!(state.current_text, "a");
        assert_eq!(state.recent_characters.len(), 1);
        assert_eq!(state.substitution_rules.len(), 1);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let state: EditorState = serde_json::from_str(r#"{"currentText": "a"}"#).unwrap();
        assert!(state.substitution_rules.is_empty());
        assert!(state.recent_characters.is_empty());
    }
}
