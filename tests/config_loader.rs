mod common;

use common::temp_config;
use frontend_bites::bites::infinite::RetryPolicy;
use frontend_bites::bites::search::EmptyQueryPolicy;
use frontend_bites::config::{Config, ConfigError, ThemeSetting};
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.theme.mode, ThemeSetting::System);
    assert_eq!(config.search.debounce_ms, 300);
    assert_eq!(config.search.empty_query, EmptyQueryPolicy::NoResults);
    assert_eq!(config.scroll.threshold, 4);
    assert_eq!(config.scroll.page_size, 9);
    assert_eq!(config.scroll.initial_items, 9);
    assert_eq!(config.scroll.max_items, Some(108));
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.backoff_base_ms, 500);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("frontend-bites/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = temp_config(
        r#"
[search]
debounce_ms = 150
empty_query = "show_all"

[theme]
mode = "dark"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.search.debounce(), Duration::from_millis(150));
    assert_eq!(config.search.empty_query, EmptyQueryPolicy::ShowAll);
    assert_eq!(config.theme.mode, ThemeSetting::Dark);
    assert_eq!(config.scroll.page_size, 9);
    assert_eq!(config.ui.tick_rate_ms, 250);
}

#[test]
fn test_retry_section_maps_to_policy() {
    let (_dir, path) = temp_config("[retry]\nmax_attempts = 5\nbackoff_base_ms = 100\n");
    let config = Config::load_from(&path).unwrap();
    let policy = RetryPolicy::from(&config.retry);
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.backoff_for(3), Duration::from_millis(400));
}

#[test]
fn test_zero_page_size_rejected() {
    let (_dir, path) = temp_config("[scroll]\npage_size = 0\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("scroll.page_size"));
}

#[test]
fn test_zero_tick_rate_rejected() {
    let (_dir, path) = temp_config("[ui]\ntick_rate_ms = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_zero_attempts_rejected() {
    let (_dir, path) = temp_config("[retry]\nmax_attempts = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = temp_config("[scroll\npage_size = 3");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_unknown_theme_mode_is_parse_error() {
    let (_dir, path) = temp_config("[theme]\nmode = \"sepia\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}
