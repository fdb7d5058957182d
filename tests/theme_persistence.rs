//! Theme controller backed by the on-disk preference store.

use frontend_bites::preferences::{ChangeOrigin, FilePreferenceStore, PreferenceStore};
use frontend_bites::theme::{SystemAppearance, ThemeController, ThemeMode, THEME_KEY};
use std::sync::Arc;
use tempfile::TempDir;

const DARK_SYSTEM: SystemAppearance = SystemAppearance { prefers_dark: true };
const LIGHT_SYSTEM: SystemAppearance = SystemAppearance {
    prefers_dark: false,
};

fn open(dir: &TempDir) -> Arc<FilePreferenceStore> {
    Arc::new(FilePreferenceStore::open(dir.path().join("preferences.json")).unwrap())
}

#[test]
fn nothing_saved_follows_system() {
    let dir = TempDir::new().unwrap();
    assert_eq!(ThemeController::load(open(&dir), DARK_SYSTEM).mode(), ThemeMode::Dark);
    assert_eq!(ThemeController::load(open(&dir), LIGHT_SYSTEM).mode(), ThemeMode::Light);
}

#[test]
fn toggle_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut theme = ThemeController::load(open(&dir), LIGHT_SYSTEM);
    assert_eq!(theme.toggle(), ThemeMode::Dark);
    drop(theme);

    let reopened = ThemeController::load(open(&dir), LIGHT_SYSTEM);
    assert_eq!(reopened.mode(), ThemeMode::Dark);

    let raw = std::fs::read_to_string(dir.path().join("preferences.json")).unwrap();
    assert!(raw.contains("\"dark\""));
}

#[test]
fn toggle_is_broadcast_to_subscribers() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let mut rx = store.subscribe();
    let mut theme = ThemeController::load(store, DARK_SYSTEM);

    theme.toggle();
    let change = rx.try_recv().unwrap();
    assert_eq!(change.key, THEME_KEY);
    assert_eq!(change.value.as_deref(), Some("light"));
    assert_eq!(change.origin, ChangeOrigin::Local);
}

#[test]
fn second_session_sees_toggle_on_poll() {
    let dir = TempDir::new().unwrap();
    let mut first = ThemeController::load(open(&dir), LIGHT_SYSTEM);
    let mut second = ThemeController::load(open(&dir), LIGHT_SYSTEM);

    first.toggle();
    assert!(second.sync_external());
    assert_eq!(second.mode(), ThemeMode::Dark);
}

#[test]
fn unreadable_value_falls_back_to_system() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.write(THEME_KEY, "sepia").unwrap();
    assert_eq!(ThemeController::load(store, DARK_SYSTEM).mode(), ThemeMode::Dark);
}
