//! In-process preference store for tests and ephemeral sessions.

use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::{
    change_channel, diff_maps, ChangeOrigin, PreferenceChange, PreferenceError, PreferenceMap,
    PreferenceStore,
};

#[derive(Debug, Default)]
struct State {
    values: PreferenceMap,
    /// Backing values as another session would have left them.
    external: Option<PreferenceMap>,
}

pub struct MemoryPreferenceStore {
    state: Mutex<State>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            changes: change_channel(),
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .state
            .lock()
            .values
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Simulate another session writing `key`. Visible after
    /// [`poll_external`](PreferenceStore::poll_external).
    pub fn set_external(&self, key: &str, value: &str) {
        let mut state = self.state.lock();
        let mut external = state.external.take().unwrap_or_else(|| state.values.clone());
        external.insert(key.to_string(), value.to_string());
        state.external = Some(external);
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.state.lock().values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let previous = self
            .state
            .lock()
            .values
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
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
        let mut state = self.state.lock();
        let Some(external) = state.external.take() else {
            return Ok(Vec::new());
        };
        let changes = diff_maps(&state.values, &external, ChangeOrigin::External);
        state.values = external;
        drop(state);

        for change in &changes {
            let _ = self.changes.send(change.clone());
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_change_waits_for_poll() {
        let store = MemoryPreferenceStore::with_value("theme", "light");
        let mut rx = store.subscribe();

        store.set_external("theme", "dark");
        assert_eq!(store.read("theme").unwrap().as_deref(), Some("light"));

        let changes = store.poll_external().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(store.read("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(rx.try_recv().unwrap().origin, ChangeOrigin::External);
    }

    #[test]
    fn unchanged_external_value_reports_nothing() {
        let store = MemoryPreferenceStore::with_value("theme", "dark");
        store.set_external("theme", "dark");
        assert!(store.poll_external().unwrap().is_empty());
    }
}
