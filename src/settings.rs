//! Local Preferences
//!
//! Display preferences and collapsed-group keys, stored as namespaced
//! JSON blobs in localStorage. No schema versioning beyond the key
//! prefix; anything missing or undecodable falls back to defaults.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::SortMode;
use crate::query::COMPLETED_KEY;

const PREFIX: &str = "ticklist.";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = storage()?.get_item(&format!("{PREFIX}{key}")).ok()??;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::warn_1(&format!("[settings] dropping bad blob {key}: {e}").into());
            None
        }
    }
}

fn save<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = storage() else { return };
    match serde_json::to_string(value) {
        Ok(raw) => {
            let _ = storage.set_item(&format!("{PREFIX}{key}"), &raw);
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("[settings] could not encode {key}: {e}").into());
        }
    }
}

pub fn load_sort_mode() -> SortMode {
    load("sort_mode").unwrap_or_default()
}

pub fn save_sort_mode(mode: SortMode) {
    save("sort_mode", &mode);
}

pub fn load_theme() -> String {
    load("theme").unwrap_or_else(|| "system".to_string())
}

pub fn save_theme(theme: &str) {
    save("theme", &theme);
}

/// Collapsed group keys of one scope. The completed group starts
/// collapsed for scopes never touched before.
pub fn load_collapsed(scope_key: &str) -> HashSet<String> {
    load(&format!("collapsed.{scope_key}"))
        .unwrap_or_else(|| HashSet::from([COMPLETED_KEY.to_string()]))
}

pub fn save_collapsed(scope_key: &str, collapsed: &HashSet<String>) {
    save(&format!("collapsed.{scope_key}"), collapsed);
}
