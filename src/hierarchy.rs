//! Hierarchy Store
//!
//! Authoritative local mirror of folders and lists; sections are loaded
//! lazily per list and cached until a section mutation in that list's
//! context overwrites the entry.

use crate::commands::{self, ApiError};
use crate::models::{List, Section};
use crate::store::{store_sections_of, store_set_hierarchy, store_set_sections, AppStore};

/// Resolve the Inbox list id: system key first, then the literal id
/// "inbox", then the first list. The fallback chain tolerates an
/// uninitialized backend.
pub fn resolve_inbox_id(lists: &[List]) -> Option<String> {
    lists
        .iter()
        .find(|l| l.is_inbox())
        .or_else(|| lists.iter().find(|l| l.id == "inbox"))
        .or_else(|| lists.first())
        .map(|l| l.id.clone())
}

/// Detach every list owned by a deleted folder; the lists themselves
/// stay present (no cascading task loss).
pub fn detach_folder(lists: &mut [List], folder_id: &str) {
    for list in lists.iter_mut() {
        if list.folder_id.as_deref() == Some(folder_id) {
            list.folder_id = None;
        }
    }
}

/// Replace the folder/list mirror from the API. A failed load returns
/// the error and leaves the previous snapshot in place.
pub async fn load_all(store: &AppStore) -> Result<(), ApiError> {
    let folders = commands::list_folders().await?;
    let lists = commands::list_lists().await?;
    let inbox_id = resolve_inbox_id(&lists).unwrap_or_default();
    store_set_hierarchy(store, folders, lists, inbox_id);
    Ok(())
}

/// Cached sections of a list, fetching and caching on first use.
pub async fn sections_for(store: &AppStore, list_id: &str) -> Result<Vec<Section>, ApiError> {
    if let Some(cached) = store_sections_of(store, list_id) {
        return Ok(cached);
    }
    let sections = commands::list_sections(list_id).await?;
    store_set_sections(store, list_id.to_string(), sections.clone());
    Ok(sections)
}

/// Refresh one list's section cache unconditionally (after any section
/// mutation in that list's context).
pub async fn refresh_sections(store: &AppStore, list_id: &str) -> Result<Vec<Section>, ApiError> {
    let sections = commands::list_sections(list_id).await?;
    store_set_sections(store, list_id.to_string(), sections.clone());
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: &str, system_key: Option<&str>, folder: Option<&str>) -> List {
        List {
            id: id.into(),
            title: id.into(),
            emoji: None,
            folder_id: folder.map(Into::into),
            position: 0,
            system_key: system_key.map(Into::into),
        }
    }

    #[test]
    fn test_inbox_resolved_by_system_key() {
        let lists = vec![
            list("aaa", None, None),
            list("bbb", Some("inbox"), None),
        ];
        assert_eq!(resolve_inbox_id(&lists), Some("bbb".to_string()));
    }

    #[test]
    fn test_inbox_falls_back_to_literal_id() {
        let lists = vec![list("aaa", None, None), list("inbox", None, None)];
        assert_eq!(resolve_inbox_id(&lists), Some("inbox".to_string()));
    }

    #[test]
    fn test_inbox_falls_back_to_first_list() {
        let lists = vec![list("aaa", None, None), list("bbb", None, None)];
        assert_eq!(resolve_inbox_id(&lists), Some("aaa".to_string()));
    }

    #[test]
    fn test_no_lists_no_inbox() {
        assert_eq!(resolve_inbox_id(&[]), None);
    }

    #[test]
    fn test_detach_folder_keeps_lists() {
        let mut lists = vec![
            list("a", None, Some("f1")),
            list("b", None, Some("f2")),
            list("c", None, Some("f1")),
        ];
        detach_folder(&mut lists, "f1");
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0].folder_id, None);
        assert_eq!(lists[1].folder_id, Some("f2".to_string()));
        assert_eq!(lists[2].folder_id, None);
    }
}
