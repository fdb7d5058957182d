//! Thread-safe configuration storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Config container with interior mutability.
///
/// Allows multiple readers to access config concurrently while
/// supporting atomic updates on reload.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create a new ConfigStore from initial config and path.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Reload config from the file.
    ///
    /// On success, atomically replaces the current config.
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::load_from(&self.path)?;
        *self.inner.write() = config;
        tracing::info!(path = %self.path.display(), "config reloaded");
        Ok(())
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn get_returns_initial_config() {
        let store = ConfigStore::new(Config::default(), PathBuf::from("/test/config.toml"));
        assert_eq!(store.get().search.debounce_ms, 300);
    }

    #[test]
    fn reload_replaces_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[search]\ndebounce_ms = 120\n").unwrap();

        let store = ConfigStore::new(Config::default(), path);
        store.reload().unwrap();
        assert_eq!(store.get().search.debounce_ms, 120);
    }

    #[test]
    fn failed_reload_keeps_old_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "invalid { toml }").unwrap();

        let store = ConfigStore::new(Config::default(), path);
        assert!(store.reload().is_err());
        assert_eq!(store.get(), Config::default());
    }
}
