//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Look up, search and type IPA characters.
#[derive(Debug, Parser)]
#[command(name = "phonedit", version, about)]
pub struct Cli {
    /// Unified IPA dataset
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "PHONEDIT_DATA",
        default_value = "unified_ipa.json"
    )]
    pub data: PathBuf,

    /// Editor state (recent characters, saved rules)
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "PHONEDIT_STATE",
        default_value = "phonedit_state.json"
    )]
    pub state: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', global = true, action = ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find characters by name or alias
    Alias {
        /// Text contained in the name or alias
        query: String,
    },

    /// Find phones by articulatory features
    Features(FeatureArgs),

    /// Free-text search over names, aliases and features
    Search {
        /// Space-separated tokens; quote a phrase to keep it together
        query: String,
    },

    /// Replace ASCII shorthand with IPA characters
    Substitute(SubstituteArgs),

    /// Run a JSON query document against the phones
    Match {
        /// Query document, e.g. '[["type", "vowel"], ["features.height", "close"]]'
        query: String,

        /// Treat the document as a search over every value in each phone
        #[arg(long)]
        any: bool,
    },

    /// Build a unified dataset from the legacy inventory and alias table
    Merge {
        /// Legacy inventory (ipa.json)
        inventory: PathBuf,
        /// Alias table (aliases.json)
        aliases: PathBuf,
    },

    /// Show a character and remember it as recently used
    Pick {
        /// The character itself
        letter: String,
    },

    /// List recently used characters
    Recent {
        /// Forget all recent characters
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Debug, Default, Args)]
pub struct FeatureArgs {
    #[arg(long)]
    pub height: Option<String>,
    #[arg(long)]
    pub backness: Option<String>,
    #[arg(long)]
    pub rounding: Option<String>,
    #[arg(long)]
    pub place: Option<String>,
    #[arg(long)]
    pub manner: Option<String>,
    #[arg(long)]
    pub voicing: Option<String>,
}

impl FeatureArgs {
    /// The given criteria as `(feature, value)` pairs.
    pub fn criteria(&self) -> Vec<(&'static str, &str)> {
        [
            ("height", &self.height),
            ("backness", &self.backness),
            ("rounding", &self.rounding),
            ("place", &self.place),
            ("manner", &self.manner),
            ("voicing", &self.voicing),
        ]
        .into_iter()
        .filter_map(|(feature, value)| value.as_deref().map(|value| (feature, value)))
        .collect()
    }
}

#[derive(Debug, Args)]
pub struct SubstituteArgs {
    /// Built-in rule set to apply (repeatable)
    #[arg(long = "ruleset", value_name = "NAME")]
    pub rulesets: Vec<String>,

    /// JSON file of [search, replace] pairs
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Also apply the rules saved in the editor state
    #[arg(long)]
    pub saved: bool,

    /// Text to convert
    pub text: String,
}

impl Cli {
    /// Log level implied by the number of `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
