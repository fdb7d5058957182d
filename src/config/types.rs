use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bites::infinite::RetryPolicy;
use crate::bites::search::{EmptyQueryPolicy, DEBOUNCE_DELAY_MS};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub theme: ThemeConfig,
    pub search: SearchConfig,
    pub scroll: ScrollConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
}

/// Event loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval when no input arrives (default: 250).
    pub tick_rate_ms: u64,
}

/// Where the initial theme comes from when nothing was saved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    /// Ask the terminal (`COLORFGBG`).
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub mode: ThemeSetting,
}

/// Debounce search page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before the query settles (default: 300).
    pub debounce_ms: u64,
    /// What a blank query shows (default: no results).
    pub empty_query: EmptyQueryPolicy,
}

/// Infinite scroll page settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Rows below the viewport at which the sentinel counts as visible (default: 4).
    pub threshold: usize,
    /// Items per fetched page (default: 9).
    pub page_size: usize,
    /// Items rendered before the first fetch (default: 9).
    pub initial_items: usize,
    /// Simulated producer latency (default: 600).
    pub fetch_latency_ms: u64,
    /// Producer runs dry after this many items. Unset means never.
    pub max_items: Option<usize>,
    /// Every n-th fetch fails when non-zero (default: 0).
    pub fail_every: u32,
}

/// Failure handling for the infinite scroll loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Consecutive failures before the loader gives up (default: 3).
    pub max_attempts: u32,
    /// Base backoff in milliseconds, doubled per failure (default: 500).
    pub backoff_base_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: "info").
    pub level: String,
    /// Log file. Defaults to `bites.log` in the platform state directory.
    pub file: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY_MS,
            empty_query: EmptyQueryPolicy::NoResults,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold: 4,
            page_size: 9,
            initial_items: 9,
            fetch_latency_ms: 600,
            max_items: Some(108),
            fail_every: 0,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_ms: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ScrollConfig {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy::new(
            config.max_attempts,
            Duration::from_millis(config.backoff_base_ms),
        )
    }
}
