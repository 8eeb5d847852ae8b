//! Frontend Models
//!
//! Data structures matching backend entities. Ids are server-generated
//! strings; due dates are bare calendar dates (ISO `YYYY-MM-DD` on the
//! wire); timestamps are unix seconds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Folder data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: Option<String>,
    pub position: i32,
}

/// List data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    pub position: i32,
    /// `Some("inbox")` marks the permanent Inbox list.
    #[serde(default)]
    pub system_key: Option<String>,
}

impl List {
    pub fn is_inbox(&self) -> bool {
        self.system_key.as_deref() == Some(SYSTEM_KEY_INBOX)
    }
}

pub const SYSTEM_KEY_INBOX: &str = "inbox";

/// Section data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub list_id: String,
    pub title: String,
    pub position: i32,
}

/// Task data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub list_id: String,
    /// None/empty = ungrouped within its list.
    #[serde(default)]
    pub section_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Unique, order-insensitive.
    #[serde(default)]
    pub tags: Vec<String>,
    /// 0 = none, 3 = highest.
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub completed: bool,
    /// Meaningful only under manual sort mode.
    pub position: i32,
    pub created_at: i64,
}

impl Task {
    /// Section key used for grouping; normalizes empty to ungrouped.
    pub fn section_key(&self) -> Option<&str> {
        match self.section_id.as_deref() {
            Some("") | None => None,
            Some(id) => Some(id),
        }
    }
}

/// Task sort semantics for the active scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Explicit user-controlled sequence (drag to reorder).
    Manual,
    /// Due-date ascending, bucketed for display.
    DueDate,
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::DueDate
    }
}

/// Server limit on titles.
pub const TITLE_MAX_LEN: usize = 200;

/// Validate a user-entered title before any request is dispatched.
/// Returns the trimmed title, or None when it must be rejected inline.
pub fn validate_title(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > TITLE_MAX_LEN {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Buy milk  "), Some("Buy milk"));
        assert_eq!(validate_title("   "), None);
        assert_eq!(validate_title(""), None);
        let long = "x".repeat(201);
        assert_eq!(validate_title(&long), None);
        let max = "x".repeat(200);
        assert_eq!(validate_title(&max), Some(max.as_str()));
    }

    #[test]
    fn test_section_key_normalizes_empty() {
        let mut task = Task {
            id: "1".into(),
            list_id: "l1".into(),
            section_id: Some(String::new()),
            title: "t".into(),
            notes: None,
            due_date: None,
            tags: vec![],
            priority: 0,
            completed: false,
            position: 0,
            created_at: 0,
        };
        assert_eq!(task.section_key(), None);
        task.section_id = Some("s1".into());
        assert_eq!(task.section_key(), Some("s1"));
    }
}
