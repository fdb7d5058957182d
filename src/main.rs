use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use frontend_bites::bites::search::EmptyQueryPolicy;
use frontend_bites::catalog::Route;
use frontend_bites::cli::{print_catalog, print_search, resolve_route, Cli, Command};
use frontend_bites::config::{Config, ConfigStore};
use frontend_bites::logging;
use frontend_bites::preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use frontend_bites::theme::{SystemAppearance, ThemeController};
use frontend_bites::ui::runtime;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Some(Command::List { difficulty }) => {
            logging::init_stderr_tracing(&config.logging);
            print_catalog(&mut io::stdout().lock(), difficulty)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Search {
            term,
            show_all_on_empty,
        }) => {
            logging::init_stderr_tracing(&config.logging);
            let policy = if show_all_on_empty {
                EmptyQueryPolicy::ShowAll
            } else {
                config.search.empty_query
            };
            print_search(&mut io::stdout().lock(), &term, policy)?;
            return Ok(ExitCode::SUCCESS);
        }
        None => {}
    }

    let route = match cli.open.as_deref() {
        Some(id) => match resolve_route(id) {
            Ok(route) => route,
            Err(err) => {
                eprintln!("Error: {err}");
                return Ok(ExitCode::FAILURE);
            }
        },
        None => Route::Landing,
    };

    let log_path = logging::init_tracing(&config.logging).context("failed to open log file")?;
    tracing::info!(
        log = %log_path.display(),
        config = %config_path.display(),
        "frontend-bites starting"
    );

    let preferences: Arc<dyn PreferenceStore> =
        match FilePreferenceStore::open(FilePreferenceStore::default_path()) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                tracing::warn!(error = %err, "preferences unavailable, theme will not persist");
                Arc::new(MemoryPreferenceStore::new())
            }
        };
    let theme = match cli.theme {
        Some(mode) => ThemeController::with_mode(preferences, mode.into()),
        None => ThemeController::load(
            preferences,
            SystemAppearance::from_setting(config.theme.mode),
        ),
    };

    runtime::run(ConfigStore::new(config, config_path), theme, route)?;
    tracing::info!("frontend-bites exited");
    Ok(ExitCode::SUCCESS)
}
