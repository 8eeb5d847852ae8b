//! Scope Resolution
//!
//! A scope is the current selection determining which tasks are
//! visible: a concrete list, or a smart cross-list view. One exhaustive
//! match turns a scope into the request constraints, instead of string
//! comparisons scattered across call sites.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::SortMode;

/// Computed, cross-list task filters not backed by a stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmartView {
    All,
    Today,
    Next7Days,
    Inbox,
    Day(NaiveDate),
}

/// The current selection: a concrete list or a smart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    List(String),
    Smart(SmartView),
}

impl Scope {
    /// Stable key used to namespace per-scope collapse sets.
    pub fn storage_key(&self) -> String {
        match self {
            Scope::List(id) => format!("list:{id}"),
            Scope::Smart(SmartView::All) => "smart:all".to_string(),
            Scope::Smart(SmartView::Today) => "smart:today".to_string(),
            Scope::Smart(SmartView::Next7Days) => "smart:next7".to_string(),
            Scope::Smart(SmartView::Inbox) => "smart:inbox".to_string(),
            Scope::Smart(SmartView::Day(d)) => format!("smart:day:{d}"),
        }
    }

    /// Manual ordering only applies when a concrete list is selected;
    /// smart views always sort by due date.
    pub fn effective_sort(&self, preferred: SortMode) -> SortMode {
        match self {
            Scope::List(_) => preferred,
            Scope::Smart(_) => SortMode::DueDate,
        }
    }
}

/// Existence filter carried by every task request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    Active,
    Completed,
    All,
}

impl TaskFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
            TaskFilter::All => "all",
        }
    }
}

/// Resolved request constraints for one task listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    pub list_id: Option<String>,
    pub due: Option<NaiveDate>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub search: Option<String>,
    pub sort: SortMode,
}

impl TaskQuery {
    /// Unscoped active listing sorted by creation, used by the
    /// aggregate counter.
    pub fn all_active() -> Self {
        TaskQuery {
            filter: TaskFilter::Active,
            list_id: None,
            due: None,
            due_from: None,
            due_to: None,
            search: None,
            sort: SortMode::DueDate,
        }
    }

    /// Active tasks due inside `[from, to]`, for the calendar window.
    pub fn due_range(from: NaiveDate, to: NaiveDate) -> Self {
        TaskQuery {
            filter: TaskFilter::Active,
            list_id: None,
            due: None,
            due_from: Some(from),
            due_to: Some(to),
            search: None,
            sort: SortMode::DueDate,
        }
    }
}

/// Build the request constraints for a scope.
///
/// Exhaustive over every smart view; `inbox_id` is the resolved Inbox
/// list id; `search` is passed through trimmed (empty means absent).
pub fn build_query(
    scope: &Scope,
    filter: TaskFilter,
    today: NaiveDate,
    inbox_id: &str,
    search: &str,
    preferred_sort: SortMode,
) -> TaskQuery {
    let mut query = TaskQuery {
        filter,
        list_id: None,
        due: None,
        due_from: None,
        due_to: None,
        search: {
            let trimmed = search.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        },
        sort: scope.effective_sort(preferred_sort),
    };

    match scope {
        Scope::List(id) => query.list_id = Some(id.clone()),
        Scope::Smart(SmartView::All) => {}
        Scope::Smart(SmartView::Today) => query.due = Some(today),
        Scope::Smart(SmartView::Next7Days) => {
            query.due_from = Some(today);
            query.due_to = Some(today + Duration::days(6));
        }
        Scope::Smart(SmartView::Inbox) => query.list_id = Some(inbox_id.to_string()),
        Scope::Smart(SmartView::Day(d)) => query.due = Some(*d),
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_today_scope_pins_due_date() {
        let q = build_query(
            &Scope::Smart(SmartView::Today),
            TaskFilter::Active,
            today(),
            "inbox",
            "",
            SortMode::Manual,
        );
        assert_eq!(q.due, Some(today()));
        assert_eq!(q.list_id, None);
        // Smart views never use manual ordering.
        assert_eq!(q.sort, SortMode::DueDate);
    }

    #[test]
    fn test_next7_spans_today_through_plus_six() {
        let q = build_query(
            &Scope::Smart(SmartView::Next7Days),
            TaskFilter::Active,
            today(),
            "inbox",
            "",
            SortMode::DueDate,
        );
        assert_eq!(q.due_from, Some(today()));
        assert_eq!(q.due_to, NaiveDate::from_ymd_opt(2025, 3, 16));
    }

    #[test]
    fn test_inbox_scope_resolves_to_inbox_list() {
        let q = build_query(
            &Scope::Smart(SmartView::Inbox),
            TaskFilter::Active,
            today(),
            "1700000000_ab12",
            "",
            SortMode::DueDate,
        );
        assert_eq!(q.list_id, Some("1700000000_ab12".to_string()));
    }

    #[test]
    fn test_concrete_list_keeps_manual_sort() {
        let scope = Scope::List("l9".into());
        let q = build_query(
            &scope,
            TaskFilter::Completed,
            today(),
            "inbox",
            "  milk  ",
            SortMode::Manual,
        );
        assert_eq!(q.list_id, Some("l9".to_string()));
        assert_eq!(q.sort, SortMode::Manual);
        assert_eq!(q.search, Some("milk".to_string()));
        assert_eq!(q.filter, TaskFilter::Completed);
    }

    #[test]
    fn test_blank_search_is_absent() {
        let q = build_query(
            &Scope::Smart(SmartView::All),
            TaskFilter::Active,
            today(),
            "inbox",
            "   ",
            SortMode::DueDate,
        );
        assert_eq!(q.search, None);
    }

    #[test]
    fn test_storage_keys_are_distinct_per_scope() {
        let keys = [
            Scope::List("a".into()).storage_key(),
            Scope::Smart(SmartView::All).storage_key(),
            Scope::Smart(SmartView::Today).storage_key(),
            Scope::Smart(SmartView::Next7Days).storage_key(),
            Scope::Smart(SmartView::Inbox).storage_key(),
            Scope::Smart(SmartView::Day(today())).storage_key(),
        ];
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }
}
