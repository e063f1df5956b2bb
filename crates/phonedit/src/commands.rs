//! Command handlers.
//!
//! Each handler returns the rendered output; printing is left to `main`.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use phonedit_ipa::merge::unify_files;
use phonedit_ipa::{EditorState, IpaDatabase, RuleSet};
use phonedit_match::{QueryInput, Search};
use serde_json::Value;

use crate::cli::{Cli, Command, OutputFormat, SubstituteArgs};
use crate::output::{emit, CharacterList, Converted, Details, EntryList, Recent};

pub fn run(cli: &Cli) -> Result<String> {
    let format = cli.output;
    match &cli.command {
        Command::Alias { query } => {
            let db = database(&cli.data)?;
            emit(&EntryList(db.search_by_alias(query)), format)
        }
        Command::Features(args) => {
            let db = database(&cli.data)?;
            emit(&CharacterList(db.search_by_features(args.criteria())), format)
        }
        Command::Search { query } => {
            let db = database(&cli.data)?;
            emit(&CharacterList(db.search(query)), format)
        }
        Command::Substitute(args) => substitute(args, &cli.state, format),
        Command::Match { query, any } => {
            let db = database(&cli.data)?;
            run_match(&db, query, *any, format)
        }
        Command::Merge { inventory, aliases } => {
            let dataset = unify_files(inventory, aliases).context("failed to merge legacy data")?;
            emit(&dataset, format)
        }
        Command::Pick { letter } => {
            let db = database(&cli.data)?;
            pick(&db, letter, &cli.state, format)
        }
        Command::Recent { clear } => recent(*clear, &cli.state, format),
    }
}

fn database(path: &Path) -> Result<IpaDatabase> {
    IpaDatabase::load(path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))
}

fn load_state(path: &Path) -> Result<EditorState> {
    EditorState::load(path)
        .with_context(|| format!("failed to load editor state from {}", path.display()))
}

fn save_state(state: &EditorState, path: &Path) -> Result<()> {
    state
        .save(path)
        .with_context(|| format!("failed to save editor state to {}", path.display()))
}

fn substitute(args: &SubstituteArgs, state_path: &Path, format: OutputFormat) -> Result<String> {
    let mut rules = RuleSet::new();
    for name in &args.rulesets {
        rules.extend(RuleSet::builtin(name)?);
    }
    if let Some(path) = &args.rules {
        rules.extend(RuleSet::from_file(path).context("failed to load substitution rules")?);
    }
    if args.saved {
        rules.extend(load_state(state_path)?.substitution_rules);
    }
    if rules.is_empty() {
        log::info!("no substitution rules given, only normalizing");
    }

    let output = rules.apply(&args.text);
    emit(
        &Converted {
            input: args.text.clone(),
            output,
        },
        format,
    )
}

fn run_match(db: &IpaDatabase, query: &str, any: bool, format: OutputFormat) -> Result<String> {
    let document: Value = serde_json::from_str(query).context("query is not valid JSON")?;
    let found = if any {
        let search = Search::from_json(&document).context("invalid search document")?;
        db.search_anywhere(&search)
    } else {
        let query = QueryInput::from_json(&document).context("invalid query document")?;
        db.search_matching(&query)
    };
    emit(&CharacterList(found), format)
}

fn pick(db: &IpaDatabase, letter: &str, state_path: &Path, format: OutputFormat) -> Result<String> {
    let character = db
        .phone_by_letter(letter)
        .ok_or_else(|| anyhow!("no character '{}' in the dataset", letter))?;

    let mut state = load_state(state_path)?;
    state.recent_characters.push(character.letter.as_str());
    save_state(&state, state_path)?;

    emit(&Details(character), format)
}

fn recent(clear: bool, state_path: &Path, format: OutputFormat) -> Result<String> {
    let mut state = load_state(state_path)?;
    if clear {
        state.recent_characters.clear();
        save_state(&state, state_path)?;
    }
    let characters = state.recent_characters.iter().map(str::to_string).collect();
    emit(&Recent(characters), format)
}
