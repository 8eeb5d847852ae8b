//! Aggregate Counter
//!
//! Per-list, per-folder, and per-smart-view active task counts,
//! recomputed from one unscoped bulk fetch after every mutation.
//! Deliberately non-incremental: one full pull per mutation buys
//! immunity to counter drift.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::models::{List, Task};

/// Active-task counts for the sidebar badges and smart views.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Counts {
    pub all: usize,
    pub today: usize,
    pub next7: usize,
    pub inbox: usize,
    pub per_list: HashMap<String, usize>,
    pub per_folder: HashMap<String, usize>,
}

/// Derive all counts from the full active-task collection.
///
/// `tasks` must already be existence-filtered to active; folder counts
/// are the sum of their lists' counts.
pub fn derive_counts(tasks: &[Task], lists: &[List], inbox_id: &str, today: NaiveDate) -> Counts {
    let week_end = today + Duration::days(6);

    let mut counts = Counts {
        all: tasks.len(),
        ..Counts::default()
    };

    for task in tasks {
        if let Some(due) = task.due_date {
            if due == today {
                counts.today += 1;
            }
            if due >= today && due <= week_end {
                counts.next7 += 1;
            }
        }
        *counts.per_list.entry(task.list_id.clone()).or_default() += 1;
    }

    counts.inbox = counts.per_list.get(inbox_id).copied().unwrap_or(0);

    for list in lists {
        if let Some(folder_id) = &list.folder_id {
            let n = counts.per_list.get(&list.id).copied().unwrap_or(0);
            *counts.per_folder.entry(folder_id.clone()).or_default() += n;
        }
    }

    counts
}

/// Pull the full active collection and swap in fresh counts. A failed
/// fetch keeps the stale counts visible.
pub async fn refresh(store: &crate::store::AppStore, today: NaiveDate) {
    match crate::commands::list_tasks(&crate::scope::TaskQuery::all_active()).await {
        Ok(tasks) => {
            let lists = crate::store::store_lists(store);
            let inbox_id = crate::store::store_inbox_id(store);
            let counts = derive_counts(&tasks, &lists, &inbox_id, today);
            crate::store::store_set_counts(store, counts);
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("[counts] refresh failed: {e}").into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, list: &str, due: Option<NaiveDate>) -> Task {
        Task {
            id: id.into(),
            list_id: list.into(),
            section_id: None,
            title: id.into(),
            notes: None,
            due_date: due,
            tags: vec![],
            priority: 0,
            completed: false,
            position: 0,
            created_at: 0,
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_counts_by_due_membership() {
        let tasks = vec![
            task("a", "inbox", Some(today())),
            task("b", "inbox", Some(today() + Duration::days(3))),
            task("c", "work", Some(today() + Duration::days(6))),
            task("d", "work", Some(today() + Duration::days(7))),
            task("e", "work", None),
        ];
        let lists = vec![list("inbox", None), list("work", Some("f1"))];

        let counts = derive_counts(&tasks, &lists, "inbox", today());
        assert_eq!(counts.all, 5);
        assert_eq!(counts.today, 1);
        // today, +3 and +6 are inside the window; +7 and undated are not.
        assert_eq!(counts.next7, 3);
        assert_eq!(counts.inbox, 2);
        assert_eq!(counts.per_list["work"], 3);
        assert_eq!(counts.per_folder["f1"], 3);
    }

    #[test]
    fn test_overdue_tasks_count_toward_all_only() {
        let tasks = vec![task("a", "inbox", Some(today() - Duration::days(1)))];
        let counts = derive_counts(&tasks, &[list("inbox", None)], "inbox", today());
        assert_eq!(counts.all, 1);
        assert_eq!(counts.today, 0);
        assert_eq!(counts.next7, 0);
    }

    #[test]
    fn test_create_then_delete_today_tasks() {
        // N created due today, M deleted: today count is N - M.
        let n = 5;
        let m = 2;
        let mut tasks: Vec<Task> = (0..n)
            .map(|i| task(&format!("t{i}"), "inbox", Some(today())))
            .collect();
        tasks.truncate(n - m);
        let counts = derive_counts(&tasks, &[list("inbox", None)], "inbox", today());
        assert_eq!(counts.today, n - m);
    }

    #[test]
    fn test_empty_collection() {
        let counts = derive_counts(&[], &[list("inbox", None)], "inbox", today());
        assert_eq!(counts, Counts::default());
    }
}
