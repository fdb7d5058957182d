//! Light/dark mode, persisted through a [`PreferenceStore`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ThemeSetting;
use crate::preferences::{PreferenceChange, PreferenceStore};

/// Preference key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// The terminal's own color scheme, used before the user picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemAppearance {
    pub prefers_dark: bool,
}

impl SystemAppearance {
    /// Resolve from config, asking the terminal when set to `system`.
    pub fn from_setting(setting: ThemeSetting) -> Self {
        match setting {
            ThemeSetting::Light => Self { prefers_dark: false },
            ThemeSetting::Dark => Self { prefers_dark: true },
            ThemeSetting::System => Self::detect(),
        }
    }

    /// Read `COLORFGBG`. Terminals without it are assumed dark.
    pub fn detect() -> Self {
        let value = std::env::var("COLORFGBG").ok();
        Self::from_colorfgbg(value.as_deref())
    }

    /// Parse `"fg;bg"` (or `"fg;default;bg"`). Background colors 7 and 15
    /// are light; anything else, or an unparsable value, is dark.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        let prefers_dark = !matches!(background, Some(7) | Some(15));
        Self { prefers_dark }
    }

    pub fn mode(&self) -> ThemeMode {
        if self.prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

/// Current theme plus the store it is saved to.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    mode: ThemeMode,
}

impl ThemeController {
    /// Use the saved mode if there is a valid one, else the system appearance.
    pub fn load(store: Arc<dyn PreferenceStore>, system: SystemAppearance) -> Self {
        let saved = match store.read(THEME_KEY) {
            Ok(value) => value.and_then(|v| v.parse::<ThemeMode>().ok()),
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved theme");
                None
            }
        };
        let mode = saved.unwrap_or_else(|| system.mode());
        tracing::debug!(%mode, saved = saved.is_some(), "theme resolved");
        Self { store, mode }
    }

    /// Start from `mode` regardless of what is saved.
    pub fn with_mode(store: Arc<dyn PreferenceStore>, mode: ThemeMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode and save it. A failed save still flips the mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(err) = self.store.write(THEME_KEY, self.mode.as_str()) {
            tracing::warn!(error = %err, "could not save theme preference");
        }
        self.mode
    }

    /// Follow a change made elsewhere. Returns true if the mode changed.
    pub fn apply_change(&mut self, change: &PreferenceChange) -> bool {
        if change.key != THEME_KEY {
            return false;
        }
        let Some(mode) = change.value.as_deref().and_then(|v| v.parse().ok()) else {
            return false;
        };
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }

    /// Poll the store for external edits and apply any theme change.
    pub fn sync_external(&mut self) -> bool {
        match self.store.poll_external() {
            Ok(changes) => changes
                .iter()
                .fold(false, |changed, change| self.apply_change(change) || changed),
            Err(err) => {
                tracing::warn!(error = %err, "could not poll preferences");
                false
            }
        }
    }
}
