//! Rendering command results as text or JSON.

use std::fmt::Write;

use anyhow::Result;
use phonedit_ipa::{Character, Dataset, IndexEntry};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Plain-text rendering of a command result.
pub trait Render {
    fn render_text(&self) -> String;
}

/// Renders `value` in the requested format.
pub fn emit<T: Serialize + Render>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => value.render_text(),
        OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
    })
}

/// Characters found by a search, one per line.
#[derive(Serialize)]
#[serde(transparent)]
pub struct CharacterList<'a>(pub Vec<&'a Character>);

impl Render for CharacterList<'_> {
    fn render_text(&self) -> String {
        self.0.iter().fold(String::new(), |mut out, character| {
            let label = if character.name.is_empty() {
                character.aliases.first().map_or("", String::as_str)
            } else {
                character.name.as_str()
            };
            let _ = writeln!(out, "{}\t{}", character.letter, label);
            out
        })
    }
}

/// Index entries found by alias search.
#[derive(Serialize)]
#[serde(transparent)]
pub struct EntryList<'a>(pub Vec<&'a IndexEntry>);

impl Render for EntryList<'_> {
    fn render_text(&self) -> String {
        self.0.iter().fold(String::new(), |mut out, entry| {
            let _ = writeln!(out, "{}\t{}\t({})", entry.letter, entry.name, entry.kind);
            out
        })
    }
}

/// A single character, shown in full.
#[derive(Serialize)]
#[serde(transparent)]
pub struct Details<'a>(pub &'a Character);

impl Render for Details<'_> {
    fn render_text(&self) -> String {
        let character = self.0;
        let mut out = String::new();
        let _ = writeln!(out, "{}  {}", character.letter, character.name);
        let _ = writeln!(out, "  type: {}", character.kind);
        for name in character.features.keys() {
            if let Some(text) = character.feature_text(name) {
                let _ = writeln!(out, "  {}: {}", name, text);
            }
        }
        if !character.aliases.is_empty() {
            let _ = writeln!(out, "  aliases: {}", character.aliases.join(", "));
        }
        out
    }
}

/// Text before and after substitution.
#[derive(Serialize)]
pub struct Converted {
    pub input: String,
    pub output: String,
}

impl Render for Converted {
    fn render_text(&self) -> String {
        format!("{}\n", self.output)
    }
}

/// Recently used characters, newest first.
#[derive(Serialize)]
#[serde(transparent)]
pub struct Recent(pub Vec<String>);

impl Render for Recent {
    fn render_text(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        format!("{}\n", self.0.join(" "))
    }
}

impl Render for Dataset {
    // A dataset is data; text output is the same JSON.
    fn render_text(&self) -> String {
        serde_json::to_string_pretty(self).map_or_else(|_| String::new(), |json| json + "\n")
    }
}
