//! Persisted sortable-table preferences.
//!
//! One JSON blob per view under `prefs:<view>`. Missing, unreadable, or
//! corrupt state falls back to the defaults silently; preference storage
//! must never break a view.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::domain::ports::kv_store::KeyValueStore;
use crate::domain::values::sorting::{FilterSpec, SortSpec};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablePreferences {
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub filters: FilterSpec,
}

fn prefs_key(view: &str) -> String {
    format!("prefs:{view}")
}

pub fn load(store: &dyn KeyValueStore, view: &str) -> TablePreferences {
    let raw = match store.get(&prefs_key(view)) {
        Ok(Some(raw)) => raw,
        Ok(None) => return TablePreferences::default(),
        Err(e) => {
            debug!("preference read failed for view '{view}': {e}");
            return TablePreferences::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        debug!("corrupt preferences for view '{view}': {e}");
        TablePreferences::default()
    })
}

pub fn save(store: &dyn KeyValueStore, view: &str, prefs: &TablePreferences) {
    let encoded = match serde_json::to_string(prefs) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("failed to encode preferences for view '{view}': {e}");
            return;
        }
    };
    if let Err(e) = store.set(&prefs_key(view), &encoded) {
        warn!("failed to persist preferences for view '{view}': {e}");
    }
}

pub fn reset(store: &dyn KeyValueStore, view: &str) {
    if let Err(e) = store.remove(&prefs_key(view)) {
        warn!("failed to reset preferences for view '{view}': {e}");
    }
}
