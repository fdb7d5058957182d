//! Key-value display preferences that survive restarts.
//!
//! Everything that persists a preference goes through [`PreferenceStore`] so
//! tests can swap the file-backed store for [`MemoryPreferenceStore`].

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::broadcast;

pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;

const CHANGE_CHANNEL_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to access preferences '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock preferences '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed preferences file '{path}': {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Who produced a [`PreferenceChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A write through this store instance.
    Local,
    /// Another session modified the backing storage.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    pub key: String,
    /// New value, or `None` when the key disappeared.
    pub value: Option<String>,
    pub origin: ChangeOrigin,
}

pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Receive every change, local or external, made after this call.
    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange>;

    /// Pick up modifications made outside this instance since the last call.
    ///
    /// Detected changes are also broadcast to subscribers.
    fn poll_external(&self) -> Result<Vec<PreferenceChange>, PreferenceError>;
}

fn change_channel() -> broadcast::Sender<PreferenceChange> {
    broadcast::channel(CHANGE_CHANNEL_SIZE).0
}

type PreferenceMap = std::collections::BTreeMap<String, String>;

/// Changes needed to turn `old` into `new`, in key order.
fn diff_maps(old: &PreferenceMap, new: &PreferenceMap, origin: ChangeOrigin) -> Vec<PreferenceChange> {
    let mut changes = Vec::new();
    for (key, value) in new {
        if old.get(key) != Some(value) {
            changes.push(PreferenceChange {
                key: key.clone(),
                value: Some(value.clone()),
                origin,
            });
        }
    }
    for key in old.keys().filter(|key| !new.contains_key(*key)) {
        changes.push(PreferenceChange {
            key: key.clone(),
            value: None,
            origin,
        });
    }
    changes
}
