//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use frontend_bites::config::{Config, ConfigStore};
use frontend_bites::preferences::MemoryPreferenceStore;
use frontend_bites::theme::{ThemeController, ThemeMode};
use frontend_bites::ui::app::App;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Write `content` to `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- App helpers --------------------------------------------------------------

pub fn make_app() -> App {
    make_app_with(Config::default())
}

/// App on an 80x24 screen with an in-memory preference store.
pub fn make_app_with(config: Config) -> App {
    let store = Arc::new(MemoryPreferenceStore::new());
    let theme = ThemeController::with_mode(store, ThemeMode::Light);
    let config = ConfigStore::new(config, PathBuf::from("/tmp/frontend-bites-test.toml"));
    let mut app = App::new(config, theme);
    app.on_resize(80, 24);
    app
}

pub fn press_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl_key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}
