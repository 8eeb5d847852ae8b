//! Task Store & Query Engine
//!
//! Resolves the current scope plus free-text search into the grouped
//! render model: date buckets under due-date sort, per-section groups
//! under manual sort, and an always-last completed group.

use chrono::{Duration, NaiveDate};
use futures::future;

use crate::commands::{self, ApiError};
use crate::models::{Section, SortMode, Task};
use crate::scope::{build_query, Scope, TaskFilter};
use crate::store::{
    store_inbox_id, store_set_tasks, store_sort_mode, AppStore,
};

/// Collapse key of the completed group.
pub const COMPLETED_KEY: &str = "completed";
/// Collapse key of the ungrouped pseudo-section.
pub const UNGROUPED_KEY: &str = "section:ungrouped";

/// One collapsible group of the render model.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskGroup {
    /// Stable collapse key within the scope
    pub key: String,
    pub label: String,
    pub tasks: Vec<Task>,
}

/// The four fixed due-date buckets, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateBucket {
    Today,
    Tomorrow,
    Later,
    NoDate,
}

impl DateBucket {
    pub const ORDER: [DateBucket; 4] = [
        DateBucket::Today,
        DateBucket::Tomorrow,
        DateBucket::Later,
        DateBucket::NoDate,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateBucket::Today => "bucket:today",
            DateBucket::Tomorrow => "bucket:tomorrow",
            DateBucket::Later => "bucket:later",
            DateBucket::NoDate => "bucket:none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateBucket::Today => "Today",
            DateBucket::Tomorrow => "Tomorrow",
            DateBucket::Later => "Later",
            DateBucket::NoDate => "No date",
        }
    }
}

/// Bucket for a due date. Overdue tasks surface under Today rather
/// than disappearing.
pub fn bucket_for(due: Option<NaiveDate>, today: NaiveDate) -> DateBucket {
    match due {
        None => DateBucket::NoDate,
        Some(d) if d <= today => DateBucket::Today,
        Some(d) if d == today + Duration::days(1) => DateBucket::Tomorrow,
        Some(_) => DateBucket::Later,
    }
}

/// Partition active tasks into the four fixed buckets, omitting empty
/// ones, preserving the incoming (server-sorted) order inside each.
pub fn group_by_due(tasks: &[Task], today: NaiveDate) -> Vec<TaskGroup> {
    let mut buckets: [Vec<Task>; 4] = Default::default();
    for task in tasks {
        let idx = DateBucket::ORDER
            .iter()
            .position(|b| *b == bucket_for(task.due_date, today))
            .unwrap_or(3);
        buckets[idx].push(task.clone());
    }

    DateBucket::ORDER
        .iter()
        .zip(buckets)
        .filter(|(_, tasks)| !tasks.is_empty())
        .map(|(bucket, tasks)| TaskGroup {
            key: bucket.key().to_string(),
            label: bucket.label().to_string(),
            tasks,
        })
        .collect()
}

/// Partition tasks by section for a manual-mode list: the ungrouped
/// pseudo-section first, then explicit sections by sort position.
/// Tasks referencing a section we don't know (stale cache) fall back
/// to ungrouped so every task renders exactly once. Empty explicit
/// sections are kept: they are drop targets.
pub fn group_by_section(tasks: &[Task], sections: &[Section]) -> Vec<TaskGroup> {
    let mut sections = sections.to_vec();
    sections.sort_by_key(|s| s.position);

    let mut groups = vec![TaskGroup {
        key: UNGROUPED_KEY.to_string(),
        label: String::new(),
        tasks: Vec::new(),
    }];
    for section in &sections {
        groups.push(TaskGroup {
            key: format!("section:{}", section.id),
            label: section.title.clone(),
            tasks: Vec::new(),
        });
    }

    for task in tasks {
        let idx = task
            .section_key()
            .and_then(|sid| sections.iter().position(|s| s.id == sid).map(|i| i + 1))
            .unwrap_or(0);
        groups[idx].tasks.push(task.clone());
    }

    for group in &mut groups {
        group.tasks.sort_by_key(|t| t.position);
    }

    groups
}

/// The grouped render model for the active tasks of a scope.
pub fn build_groups(
    scope: &Scope,
    sort_mode: SortMode,
    tasks: &[Task],
    sections: &[Section],
    today: NaiveDate,
) -> Vec<TaskGroup> {
    match (scope, scope.effective_sort(sort_mode)) {
        (Scope::List(_), SortMode::Manual) => group_by_section(tasks, sections),
        _ => group_by_due(tasks, today),
    }
}

/// Load the current scope: two parallel existence-filtered requests.
/// Either failure aborts the whole load and leaves stale data visible.
pub async fn load_scope(
    store: &AppStore,
    scope: &Scope,
    search: &str,
    today: NaiveDate,
) -> Result<(), ApiError> {
    let inbox_id = store_inbox_id(store);
    let sort = store_sort_mode(store);

    let active_query = build_query(scope, TaskFilter::Active, today, &inbox_id, search, sort);
    let completed_query = build_query(scope, TaskFilter::Completed, today, &inbox_id, search, sort);

    let (active, completed) = future::join(
        commands::list_tasks(&active_query),
        commands::list_tasks(&completed_query),
    )
    .await;
    let active = active?;
    let completed = completed?;

    // Manual list scopes also need that list's sections for grouping.
    if let Scope::List(list_id) = scope {
        if sort == SortMode::Manual {
            crate::hierarchy::sections_for(store, list_id).await?;
        }
    }

    store_set_tasks(store, active, completed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::SmartView;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn task(id: &str, due: Option<NaiveDate>, section: Option<&str>, position: i32) -> Task {
        Task {
            id: id.into(),
            list_id: "l1".into(),
            section_id: section.map(Into::into),
            title: id.into(),
            notes: None,
            due_date: due,
            tags: vec![],
            priority: 0,
            completed: false,
            position,
            created_at: 0,
        }
    }

    fn section(id: &str, position: i32) -> Section {
        Section {
            id: id.into(),
            list_id: "l1".into(),
            title: format!("Section {id}"),
            position,
        }
    }

    #[test]
    fn test_every_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            task("a", Some(today()), None, 0),
            task("b", Some(today() + Duration::days(1)), None, 0),
            task("c", Some(today() + Duration::days(5)), None, 0),
            task("d", None, None, 0),
            task("e", Some(today() - Duration::days(3)), None, 0),
        ];
        let groups = group_by_due(&tasks, today());

        let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, tasks.len());
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["bucket:today", "bucket:tomorrow", "bucket:later", "bucket:none"]
        );
        // Overdue surfaces under Today.
        assert!(groups[0].tasks.iter().any(|t| t.id == "e"));
    }

    #[test]
    fn test_empty_buckets_are_omitted_and_order_fixed() {
        let tasks = vec![
            task("later", Some(today() + Duration::days(9)), None, 0),
            task("today", Some(today()), None, 0),
        ];
        let groups = group_by_due(&tasks, today());
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["bucket:today", "bucket:later"]);
    }

    #[test]
    fn test_section_grouping_ignores_due_dates() {
        let sections = vec![section("s2", 1), section("s1", 0)];
        let tasks = vec![
            task("a", Some(today()), Some("s2"), 0),
            task("b", None, None, 1),
            task("c", Some(today() + Duration::days(30)), Some("s1"), 0),
            task("d", None, None, 0),
        ];
        let groups = group_by_section(&tasks, &sections);

        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec![UNGROUPED_KEY, "section:s1", "section:s2"]);
        // Ungrouped tasks come in manual position order.
        let ungrouped: Vec<_> = groups[0].tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ungrouped, vec!["d", "b"]);
        assert_eq!(groups[1].tasks[0].id, "c");
        assert_eq!(groups[2].tasks[0].id, "a");
    }

    #[test]
    fn test_stale_section_reference_falls_back_to_ungrouped() {
        let tasks = vec![task("a", None, Some("gone"), 0)];
        let groups = group_by_section(&tasks, &[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, UNGROUPED_KEY);
        assert_eq!(groups[0].tasks.len(), 1);
    }

    #[test]
    fn test_empty_sections_remain_as_drop_targets() {
        let groups = group_by_section(&[], &[section("s1", 0)]);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.tasks.is_empty()));
    }

    #[test]
    fn test_smart_scopes_always_bucket_by_date() {
        let tasks = vec![task("a", Some(today()), Some("s1"), 0)];
        let groups = build_groups(
            &Scope::Smart(SmartView::Today),
            SortMode::Manual,
            &tasks,
            &[section("s1", 0)],
            today(),
        );
        assert_eq!(groups[0].key, "bucket:today");
    }

    #[test]
    fn test_manual_list_scope_groups_by_section() {
        let tasks = vec![task("a", Some(today()), Some("s1"), 0)];
        let groups = build_groups(
            &Scope::List("l1".into()),
            SortMode::Manual,
            &tasks,
            &[section("s1", 0)],
            today(),
        );
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec![UNGROUPED_KEY, "section:s1"]);
    }
}
