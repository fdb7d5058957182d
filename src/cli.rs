//! Command-line interface and the non-interactive subcommands.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::bites::search::{filter_records, results_caption, EmptyQueryPolicy, SEARCH_DATA};
use crate::catalog::{bite_ids, filter_by_difficulty, find_bite, Difficulty, Route, BITES};
use crate::theme::ThemeMode;

#[derive(Parser, Debug)]
#[command(name = "bites", author, version, about = "Frontend interaction demos in the terminal")]
pub struct Cli {
    /// Config file [default: <config dir>/frontend-bites/config.toml]
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Start in this theme instead of the saved one
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,

    /// Open a bite directly by id (see `bites list`)
    #[arg(long, value_name = "ID")]
    pub open: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the bite catalog
    List {
        /// Only show bites of this difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Run the search filter once and print the matches
    Search {
        term: String,

        /// List every record when the term is blank
        #[arg(long)]
        show_all_on_empty: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Bite '{id}' not found. Available bites: {available}")]
pub struct UnknownBite {
    pub id: String,
    pub available: String,
}

/// Route for `--open ID`.
pub fn resolve_route(id: &str) -> Result<Route, UnknownBite> {
    find_bite(id).map(|bite| bite.route).ok_or_else(|| UnknownBite {
        id: id.to_string(),
        available: bite_ids().join(", "),
    })
}

pub fn print_catalog(out: &mut impl Write, difficulty: Option<Difficulty>) -> io::Result<()> {
    let bites = filter_by_difficulty(BITES, difficulty);
    if bites.is_empty() {
        return writeln!(out, "No bites found for this difficulty level.");
    }
    for bite in bites {
        writeln!(
            out,
            "{:<18} {:<14} {:<13} {}",
            bite.id,
            bite.category.label(),
            bite.difficulty.label(),
            bite.title
        )?;
    }
    Ok(())
}

pub fn print_search(out: &mut impl Write, term: &str, policy: EmptyQueryPolicy) -> io::Result<()> {
    let results = filter_records(term, SEARCH_DATA, policy);
    writeln!(out, "{}", results_caption(term, results.len()))?;
    if results.is_empty() && !term.trim().is_empty() {
        writeln!(out, "No results found for \"{term}\"")?;
    }
    for record in results {
        writeln!(out, "{:>3}  {:<18} {}", record.id, record.name, record.category)?;
    }
    Ok(())
}
