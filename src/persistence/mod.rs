//! Durable snapshot persistence
//!
//! The whole undo/redo history is serialized to JSON as one record under a
//! single fixed storage key. Two record shapes load: the current
//! `{history, cursor}` envelope, and the legacy bare state (an `objects`
//! field with no `history` wrapper), which wraps into a one-entry history.
//! Any failure - missing record, malformed JSON, storage unavailable - is
//! logged and treated as "no prior state"; it never interrupts the
//! simulation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;
use crate::sim::history::HistoryManager;
use crate::sim::state::SimState;

/// Key/value storage the gateway reads and writes through. LocalStorage
/// in the browser, an in-memory map for native hosts and tests.
pub trait StateStore {
    fn read(&self, key: &str) -> Option<String>;
    /// Returns false when the backing storage rejected the write
    fn write(&mut self, key: &str, value: &str) -> bool;
}

/// The durable record shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveRecord {
    history: Vec<SimState>,
    cursor: i64,
}

/// Serialize the full history under the fixed key. Failures are swallowed
/// with a diagnostic.
pub fn save(store: &mut dyn StateStore, history: &HistoryManager) {
    let record = SaveRecord {
        history: history.snapshots().to_vec(),
        cursor: history.cursor().map_or(-1, |c| c as i64),
    };
    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("failed to serialize seesaw state: {err}");
            return;
        }
    };
    if !store.write(STORAGE_KEY, &json) {
        log::warn!("failed to persist seesaw state");
    }
}

/// Read the record back, sniffing the stored shape. Returns None when
/// nothing usable is stored; the caller proceeds with a fresh history.
pub fn load(store: &dyn StateStore) -> Option<HistoryManager> {
    let raw = store.read(STORAGE_KEY)?;
    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("discarding unreadable seesaw record: {err}");
            return None;
        }
    };

    if value.get("history").is_some() {
        match serde_json::from_value::<SaveRecord>(value) {
            Ok(record) => {
                let cursor = record.cursor.max(0) as usize;
                let history = HistoryManager::from_parts(record.history, cursor);
                if history.is_empty() {
                    return None;
                }
                log::info!("loaded history with {} snapshot(s)", history.len());
                Some(history)
            }
            Err(err) => {
                log::warn!("discarding malformed history record: {err}");
                None
            }
        }
    } else if value.get("objects").is_some() {
        // Legacy record: a single bare state from before undo/redo
        match serde_json::from_value::<SimState>(value) {
            Ok(state) => {
                log::info!("loaded legacy single-state record");
                Some(HistoryManager::from_parts(vec![state], 0))
            }
            Err(err) => {
                log::warn!("discarding malformed legacy record: {err}");
                None
            }
        }
    } else {
        log::warn!("discarding unrecognized seesaw record");
        None
    }
}

/// HashMap-backed store for native hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_owned(), value.to_owned());
        true
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl StateStore for LocalStore {
    fn read(&self, key: &str) -> Option<String> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok()).flatten()?;
        storage.get_item(key).ok().flatten()
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten() else {
            return false;
        };
        storage.set_item(key, value).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::Session;

    fn assert_state_eq(a: &SimState, b: &SimState) {
        assert_eq!(
            serde_json::to_value(a).unwrap(),
            serde_json::to_value(b).unwrap()
        );
    }

    #[test]
    fn test_load_missing_record() {
        let store = MemoryStore::new();
        assert!(load(&store).is_none());
    }

    #[test]
    fn test_load_malformed_record() {
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, "{not json");
        assert!(load(&store).is_none());
        store.write(STORAGE_KEY, r#"{"something":"else"}"#);
        assert!(load(&store).is_none());
        store.write(STORAGE_KEY, r#"{"history":"not a list","cursor":0}"#);
        assert!(load(&store).is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut session = Session::new(11);
        session.place_weight(5, -100.0);
        session.place_weight(3, 50.0);
        session.undo();
        let before = session.state().clone();

        let mut store = MemoryStore::new();
        save(&mut store, session.history());

        let loaded = load(&store).unwrap();
        assert_eq!(loaded.len(), session.history().len());
        assert_eq!(loaded.cursor(), session.history().cursor());

        let resumed = Session::from_history(12, loaded);
        assert_state_eq(resumed.state(), &before);
    }

    #[test]
    fn test_round_trip_preserves_redo_branch() {
        let mut session = Session::new(3);
        session.place_weight(4, 80.0);
        session.place_weight(6, -40.0);
        session.undo();

        let mut store = MemoryStore::new();
        save(&mut store, session.history());

        let mut resumed = Session::from_history(4, load(&store).unwrap());
        assert!(resumed.redo());
        assert_eq!(resumed.state().objects.len(), 2);
    }

    #[test]
    fn test_legacy_bare_state_loads_as_single_entry() {
        let legacy = r#"{
            "objects": [{"weight": 5, "offsetX": -100.0, "x": 189.0, "color": "hsl(10 68% 46%)"}],
            "nextWeight": 7,
            "angle": -12.5,
            "targetAngle": -30.0,
            "isPaused": false,
            "shapeType": "square",
            "plankWidth": 500,
            "speedSetting": "fast",
            "log": ["5kg dropped on left side at 100px from center"]
        }"#;
        let mut store = MemoryStore::new();
        store.write(STORAGE_KEY, legacy);

        let history = load(&store).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));

        let session = Session::from_history(5, history);
        let state = session.state();
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.beam_width, 500.0);
        assert_eq!(state.next_weight, 7);
        assert_eq!(state.angle, -12.5);
        assert_eq!(state.target_angle, -30.0);
        assert_eq!(state.objects[0].shape, crate::ShapeType::Square);
        assert_eq!(state.objects[0].size, crate::size_from_weight(5));
    }

    #[test]
    fn test_record_shape_on_disk() {
        let mut session = Session::new(9);
        session.place_weight(2, 30.0);
        let mut store = MemoryStore::new();
        save(&mut store, session.history());

        let raw = store.read(STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["history"].is_array());
        assert_eq!(value["cursor"], 1);
        let snapshot = &value["history"][1];
        assert!(snapshot["objects"][0]["offsetX"].is_number());
        assert!(snapshot["nextWeight"].is_number());
    }
}
