//! JSON-file preference store shared by every running session.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fs2::FileExt;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::{
    change_channel, diff_maps, ChangeOrigin, PreferenceChange, PreferenceError, PreferenceMap,
    PreferenceStore,
};

#[derive(Debug, Default)]
struct Snapshot {
    values: PreferenceMap,
    modified: Option<SystemTime>,
}

/// Preferences kept as a flat JSON object on disk.
///
/// Writes take an exclusive lock on a sibling `.lock` file, merge with the
/// current file contents, and replace the file atomically.
pub struct FilePreferenceStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl FilePreferenceStore {
    /// `preferences.json` under the platform data directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("frontend-bites").join("preferences.json")
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let snapshot = Snapshot {
            values: read_map(&path)?,
            modified: modified_time(&path),
        };
        Ok(Self {
            path,
            snapshot: Mutex::new(snapshot),
            changes: change_channel(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn persist(&self, values: &PreferenceMap) -> Result<(), PreferenceError> {
        let body = serde_json::to_string_pretty(values).map_err(|source| PreferenceError::Format {
            path: self.path.clone(),
            source,
        })?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp.write_all(body.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.sync_all().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.snapshot.lock().values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.io_error(e))?;
        FileExt::lock_exclusive(&lock_file).map_err(|source| PreferenceError::Lock {
                path: lock_path.clone(),
                source,
            })?;
        let lock_file = scopeguard::guard(lock_file, |file| {
            let _ = FileExt::unlock(&file);
        });

        let mut values = read_map(&self.path)?;
        let previous = values.insert(key.to_string(), value.to_string());
        self.persist(&values)?;
        drop(lock_file);

        let mut snapshot = self.snapshot.lock();
        let external = diff_maps(&snapshot.values, &values, ChangeOrigin::External)
            .into_iter()
            .filter(|change| change.key != key);
        for change in external {
            let _ = self.changes.send(change);
        }
        snapshot.values = values;
        snapshot.modified = modified_time(&self.path);
        drop(snapshot);

        if previous.as_deref() != Some(value) {
            tracing::debug!(key, value, "preference written");
            let _ = self.changes.send(PreferenceChange {
                key: key.to_string(),
                value: Some(value.to_string()),
                origin: ChangeOrigin::Local,
            });
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }

    fn poll_external(&self) -> Result<Vec<PreferenceChange>, PreferenceError> {
        let modified = modified_time(&self.path);
        let mut snapshot = self.snapshot.lock();
        if modified == snapshot.modified {
            return Ok(Vec::new());
        }

        let values = read_map(&self.path)?;
        let changes = diff_maps(&snapshot.values, &values, ChangeOrigin::External);
        snapshot.values = values;
        snapshot.modified = modified;
        drop(snapshot);

        for change in &changes {
            tracing::info!(key = %change.key, value = ?change.value, "preference changed externally");
            let _ = self.changes.send(change.clone());
        }
        Ok(changes)
    }
}

fn read_map(path: &Path) -> Result<PreferenceMap, PreferenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(PreferenceMap::new()),
        Err(source) => {
            return Err(PreferenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(PreferenceMap::new());
    }
    serde_json::from_str(&content).map_err(|source| PreferenceError::Format {
        path: path.to_path_buf(),
        source,
    })
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
