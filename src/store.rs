//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store
//! is the single local mirror of server-owned data; only its helpers
//! mutate it, and every mutation entry point runs on the UI thread.

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use reactive_stores::Store;

use crate::counts::Counts;
use crate::models::{Folder, List, Section, SortMode, Task};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All folders, in sibling order
    pub folders: Vec<Folder>,
    /// All lists (across folders), in sibling order
    pub lists: Vec<List>,
    /// Lazily loaded sections, cached per list id
    pub sections: HashMap<String, Vec<Section>>,
    /// Active tasks of the currently loaded scope
    pub active_tasks: Vec<Task>,
    /// Completed tasks of the currently loaded scope
    pub completed_tasks: Vec<Task>,
    /// Aggregate active-task counts
    pub counts: Counts,
    /// Resolved Inbox list id
    pub inbox_list_id: String,
    /// Preferred task sort mode (persisted display preference)
    pub sort_mode: SortMode,
    /// Collapsed group keys of the current scope (persisted per scope)
    pub collapsed: HashSet<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the folder/list mirror from a fresh load
pub fn store_set_hierarchy(store: &AppStore, folders: Vec<Folder>, lists: Vec<List>, inbox_id: String) {
    *store.folders().write() = folders;
    *store.lists().write() = lists;
    *store.inbox_list_id().write() = inbox_id;
}

/// Replace both task windows of the current scope atomically
pub fn store_set_tasks(store: &AppStore, active: Vec<Task>, completed: Vec<Task>) {
    *store.active_tasks().write() = active;
    *store.completed_tasks().write() = completed;
}

/// Overwrite the cached sections of one list
pub fn store_set_sections(store: &AppStore, list_id: String, sections: Vec<Section>) {
    store.sections().write().insert(list_id, sections);
}

/// Cached sections of one list, if loaded
pub fn store_sections_of(store: &AppStore, list_id: &str) -> Option<Vec<Section>> {
    store.sections().read().get(list_id).cloned()
}

/// Current aggregate counts (tracking read)
pub fn store_counts(store: &AppStore) -> Counts {
    store.counts().read().clone()
}

/// Detach a deleted folder locally without waiting for the next
/// hierarchy load; its lists stay present, folder-less.
pub fn store_detach_folder(store: &AppStore, folder_id: &str) {
    // Bind the subfield so the write guard does not outlive it.
    let lists_field = store.lists();
    let mut lists = lists_field.write();
    crate::hierarchy::detach_folder(lists.as_mut_slice(), folder_id);
    drop(lists);
    store.folders().write().retain(|f| f.id != folder_id);
}

/// Snapshot of the list mirror
pub fn store_lists(store: &AppStore) -> Vec<List> {
    store.lists().read().clone()
}

/// Look up a list by id in the current mirror
pub fn store_list_by_id(store: &AppStore, list_id: &str) -> Option<List> {
    store.lists().read().iter().find(|l| l.id == list_id).cloned()
}

/// Replace the aggregate counts
pub fn store_set_counts(store: &AppStore, counts: Counts) {
    *store.counts().write() = counts;
}

/// Ordered task ids of one section container of the current scope,
/// from the active window (rendered manual order).
pub fn store_task_order(store: &AppStore, list_id: &str, section_id: Option<&str>) -> Vec<String> {
    let mut tasks: Vec<(i32, String)> = store
        .active_tasks()
        .read()
        .iter()
        .filter(|t| {
            t.list_id == list_id
                && t.section_key() == section_id.filter(|s| !s.is_empty())
        })
        .map(|t| (t.position, t.id.clone()))
        .collect();
    tasks.sort_by_key(|(pos, _)| *pos);
    tasks.into_iter().map(|(_, id)| id).collect()
}

/// Ordered list ids within one folder container (None = folder-less)
pub fn store_list_order(store: &AppStore, folder_id: Option<&str>) -> Vec<String> {
    let mut lists: Vec<(i32, String)> = store
        .lists()
        .read()
        .iter()
        .filter(|l| l.folder_id.as_deref() == folder_id)
        .map(|l| (l.position, l.id.clone()))
        .collect();
    lists.sort_by_key(|(pos, _)| *pos);
    lists.into_iter().map(|(_, id)| id).collect()
}

/// Ordered folder ids (one sibling set)
pub fn store_folder_order(store: &AppStore) -> Vec<String> {
    let mut folders: Vec<(i32, String)> = store
        .folders()
        .read()
        .iter()
        .map(|f| (f.position, f.id.clone()))
        .collect();
    folders.sort_by_key(|(pos, _)| *pos);
    folders.into_iter().map(|(_, id)| id).collect()
}

/// Ordered section ids of one list, from the section cache
pub fn store_section_order(store: &AppStore, list_id: &str) -> Vec<String> {
    let mut sections: Vec<(i32, String)> = store
        .sections()
        .read()
        .get(list_id)
        .map(|s| s.iter().map(|s| (s.position, s.id.clone())).collect())
        .unwrap_or_default();
    sections.sort_by_key(|(pos, _)| *pos);
    sections.into_iter().map(|(_, id)| id).collect()
}

/// Find a task in either window of the current scope
pub fn store_task_by_id(store: &AppStore, task_id: &str) -> Option<Task> {
    store
        .active_tasks()
        .read()
        .iter()
        .find(|t| t.id == task_id)
        .cloned()
        .or_else(|| {
            store
                .completed_tasks()
                .read()
                .iter()
                .find(|t| t.id == task_id)
                .cloned()
        })
}

/// Resolved Inbox list id (empty until the first hierarchy load)
pub fn store_inbox_id(store: &AppStore) -> String {
    store.inbox_list_id().read().clone()
}

/// Preferred sort mode
pub fn store_sort_mode(store: &AppStore) -> SortMode {
    *store.sort_mode().read()
}

pub fn store_set_sort_mode(store: &AppStore, mode: SortMode) {
    *store.sort_mode().write() = mode;
}

/// Swap in the collapse set of a newly selected scope
pub fn store_set_collapsed(store: &AppStore, collapsed: HashSet<String>) {
    *store.collapsed().write() = collapsed;
}

/// Toggle one collapse key of the current scope; returns the new set
pub fn store_toggle_collapsed(store: &AppStore, key: &str) -> HashSet<String> {
    let field = store.collapsed();
    let mut collapsed = field.write();
    if !collapsed.remove(key) {
        collapsed.insert(key.to_string());
    }
    collapsed.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Folder;

    fn folder(id: &str) -> Folder {
        Folder {
            id: id.into(),
            title: id.into(),
            emoji: None,
            position: 0,
        }
    }

    fn list(id: &str, folder: Option<&str>) -> List {
        List {
            id: id.into(),
            title: id.into(),
            emoji: None,
            folder_id: folder.map(Into::into),
            position: 0,
            system_key: None,
        }
    }

    #[test]
    fn test_toggle_collapsed_round_trips() {
        let store: AppStore = Store::new(AppState::default());
        let set = store_toggle_collapsed(&store, "bucket:today");
        assert!(set.contains("bucket:today"));
        let set = store_toggle_collapsed(&store, "bucket:today");
        assert!(!set.contains("bucket:today"));
    }

    #[test]
    fn test_detach_folder_drops_folder_and_keeps_lists() {
        let store: AppStore = Store::new(AppState::default());
        store_set_hierarchy(
            &store,
            vec![folder("f1"), folder("f2")],
            vec![list("a", Some("f1")), list("b", Some("f2"))],
            "a".into(),
        );

        store_detach_folder(&store, "f1");

        assert_eq!(store_folder_order(&store), vec!["f2".to_string()]);
        let lists = store_lists(&store);
        assert_eq!(lists[0].folder_id, None);
        assert_eq!(lists[1].folder_id.as_deref(), Some("f2"));
    }
}
