use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::{Difficulty, Route};
use crate::ui::app::App;
use crate::ui::landing::LandingIntent;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    handle_key_at(app, key, Instant::now());
}

pub fn handle_key_at(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    app.clear_notice();

    // Raw mode delivers Ctrl+C as a key, not SIGINT
    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }
    if is_ctrl_char(key, 't') {
        app.toggle_theme();
        return;
    }
    if is_ctrl_char(key, 'r') {
        app.reload_config();
        return;
    }

    match app.route() {
        Route::Landing => handle_landing_key(app, key),
        Route::DebounceSearch => handle_search_key(app, key, now),
        Route::InfiniteScroll => handle_scroll_key(app, key),
    }
}

fn handle_landing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => app.dispatch_landing(LandingIntent::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => app.dispatch_landing(LandingIntent::MoveDown),
        KeyCode::Tab | KeyCode::Char('f') => app.dispatch_landing(LandingIntent::CycleFilter),
        KeyCode::Char('0') => app.dispatch_landing(LandingIntent::SelectFilter(None)),
        KeyCode::Char(ch @ '1'..='3') => {
            let index = ch as usize - '1' as usize;
            let filter = Difficulty::all().get(index).copied();
            app.dispatch_landing(LandingIntent::SelectFilter(filter));
        }
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Esc {
        app.go_back();
        return;
    }
    if is_ctrl_char(key, 'u') {
        if let Some(page) = app.search_page_mut() {
            page.clear(now);
        }
        return;
    }

    let Some(page) = app.search_page_mut() else {
        return;
    };
    match key.code {
        KeyCode::Backspace => {
            if !page.pop_char(now) {
                app.go_back();
            }
        }
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            page.push_char(ch, now);
        }
        _ => {}
    }
}

fn handle_scroll_key(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q')
    ) {
        app.go_back();
        return;
    }

    let Some(page) = app.scroll_page_mut() else {
        return;
    };
    let page_rows = page.page_rows() as isize;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => page.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => page.scroll_by(1),
        KeyCode::PageUp => page.scroll_by(-page_rows),
        KeyCode::PageDown | KeyCode::Char(' ') => page.scroll_by(page_rows),
        KeyCode::Home | KeyCode::Char('g') => page.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => page.scroll_to_bottom(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};
    use crate::preferences::MemoryPreferenceStore;
    use crate::theme::{ThemeController, ThemeMode};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn app() -> App {
        let store = Arc::new(MemoryPreferenceStore::new());
        let theme = ThemeController::with_mode(store, ThemeMode::Light);
        let config = ConfigStore::new(Config::default(), PathBuf::from("/missing/config.toml"));
        let mut app = App::new(config, theme);
        app.on_resize(80, 24);
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        handle_key(app, KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    #[test]
    fn q_quits_only_on_landing() {
        let mut app = app();
        app.open(Route::InfiniteScroll);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.route(), Route::Landing);
        assert!(!app.should_quit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn q_is_typed_into_search() {
        let mut app = app();
        app.open(Route::DebounceSearch);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.search_page().map(|p| p.input()), Some("q"));
        assert!(!app.should_quit());
    }

    #[test]
    fn backspace_on_empty_search_goes_back() {
        let mut app = app();
        app.open(Route::DebounceSearch);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.route(), Route::DebounceSearch);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.route(), Route::Landing);
    }

    #[test]
    fn digits_pick_difficulty_filter() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.landing().filter, Some(Difficulty::Advanced));
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.landing().filter, None);
    }

    #[test]
    fn ctrl_t_toggles_theme_everywhere() {
        let mut app = app();
        app.open(Route::DebounceSearch);
        ctrl(&mut app, 't');
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
        assert_eq!(app.search_page().map(|p| p.input()), Some(""));
    }

    #[test]
    fn ctrl_q_quits_from_any_page() {
        let mut app = app();
        app.open(Route::InfiniteScroll);
        ctrl(&mut app, 'q');
        assert!(app.should_quit());
    }

    #[test]
    fn end_and_home_scroll() {
        let mut app = app();
        app.open(Route::InfiniteScroll);
        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll_page().map(|p| p.offset()), Some(23));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.scroll_page().map(|p| p.offset()), Some(0));
    }
}
