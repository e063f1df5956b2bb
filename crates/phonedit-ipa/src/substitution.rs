//! Text substitution.
//!
//! Typing IPA directly is slow, so the editor lets the user type ASCII
//! shorthands such as `{sh}` and rewrites them. A [`Rule`] maps one literal
//! search string to its replacement; a [`RuleSet`] is an ordered list of
//! rules applied one after another.

use std::path::Path;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{read_json, IpaError, Result};

/// Replaces every occurrence of `search` with `replace`.
///
/// Serialized as a `[search, replace]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Rule {
    pub search: String,
    pub replace: String,
}

impl Rule {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Rule {
            search: search.into(),
            replace: replace.into(),
        }
    }

    fn pattern_len(&self) -> usize {
        self.search.chars().count()
    }
}

impl From<(String, String)> for Rule {
    fn from((search, replace): (String, String)) -> Self {
        Rule { search, replace }
    }
}

impl From<Rule> for (String, String) {
    fn from(rule: Rule) -> Self {
        (rule.search, rule.replace)
    }
}

/// Applies `rules` to `input` in order, then NFKC-normalizes the result.
///
/// Each rule replaces all occurrences of its search string in the output of
/// the previous rule. Matching is literal. Rules with an empty search string
/// are skipped.
///
/// ```
/// use phonedit_ipa::{apply_substitutions, Rule};
///
/// let rules = [Rule::new("{sh}", "ʃ"), Rule::new("{schwa}", "ə")];
/// assert_eq!(apply_substitutions("{sh}{schwa}", &rules), "ʃə");
/// ```
pub fn apply_substitutions(input: &str, rules: &[Rule]) -> String {
    let replaced = rules.iter().fold(input.to_string(), |text, rule| {
        if rule.search.is_empty() {
            log::debug!("skipping rule with empty search string");
            text
        } else {
            text.replace(&rule.search, &rule.replace)
        }
    });
    replaced.nfkc().collect()
}

/// An ordered list of rules.
///
/// Rule sets built with [`RuleSet::from`], [`RuleSet::insert`] or loaded
/// from JSON keep their rules sorted longest search string first, so a
/// longer shorthand is never pre-empted by a shorter one it contains. The
/// sort is stable: rules of equal length keep their relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Returns the rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Adds a rule, keeping the longest-first order.
    pub fn insert(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.sort();
    }

    /// Removes and returns the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Appends every rule of `other`, keeping the longest-first order.
    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
        self.sort();
    }

    /// Applies the rules to `input`. See [`apply_substitutions`].
    pub fn apply(&self, input: &str) -> String {
        apply_substitutions(input, &self.rules)
    }

    /// Returns a built-in rule set by name.
    pub fn builtin(name: &str) -> Result<Self> {
        let pairs: &[(&str, &str)] = match name {
            "ipa-basic" => IPA_BASIC,
            "tone-marks" => TONE_MARKS,
            "diacritics" => DIACRITICS,
            _ => return Err(IpaError::UnknownRuleSet(name.to_string())),
        };
        Ok(pairs
            .iter()
            .map(|&(search, replace)| Rule::new(search, replace))
            .collect())
    }

    /// Loads a rule set from a JSON file of `[search, replace]` pairs.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rules: RuleSet = read_json(path)?;
        log::debug!("loaded {} rules from {}", rules.len(), path.display());
        Ok(rules)
    }

    /// Serializes the rules as pretty-printed JSON pairs.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn sort(&mut self) {
        self.rules
            .sort_by_key(|rule| std::cmp::Reverse(rule.pattern_len()));
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        let mut set = RuleSet { rules };
        set.sort();
        set
    }
}

impl From<RuleSet> for Vec<Rule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        RuleSet::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// Names of the built-in rule sets.
pub const BUILTIN_RULE_SETS: [&str; 3] = ["ipa-basic", "tone-marks", "diacritics"];

const IPA_BASIC: &[(&str, &str)] = &[
    ("{sh}", "ʃ"),
    ("{ch}", "t\u{0361}ʃ"),
    ("{ng}", "ŋ"),
    ("{th}", "θ"),
    ("{dh}", "ð"),
    ("{zh}", "ʒ"),
    ("{eng}", "ŋ"),
    ("{glottal}", "ʔ"),
    ("{schwa}", "ə"),
    ("{openo}", "ɔ"),
    ("{opene}", "ɛ"),
    ("{ash}", "æ"),
];

const TONE_MARKS: &[(&str, &str)] = &[
    ("^0", "⁰"),
    ("^1", "¹"),
    ("^2", "²"),
    ("^3", "³"),
    ("^4", "⁴"),
    ("^5", "⁵"),
    ("^6", "⁶"),
    ("^7", "⁷"),
    ("^8", "⁸"),
    ("^9", "⁹"),
];

const DIACRITICS: &[(&str, &str)] = &[
    ("_n", "\u{0303}"), // nasal
    ("_l", "\u{02D0}"), // long
    ("_h", "\u{02B0}"), // aspirated
    ("_r", "\u{02DE}"), // rhoticity
    ("_^", "\u{0302}"), // falling tone
    ("_v", "\u{030C}"), // rising tone
    ("_'", "\u{0301}"), // high tone
    ("_\"", "\u{030B}"), // extra-high tone
    ("_`", "\u{0300}"), // low tone
    ("__", "\u{030F}"), // extra-low tone
];
