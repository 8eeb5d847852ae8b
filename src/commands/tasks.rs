//! Task Commands

use chrono::NaiveDate;
use serde::Serialize;

use super::ApiError;
use crate::models::{SortMode, Task};
use crate::scope::TaskQuery;

#[derive(Serialize)]
pub struct CreateTaskArgs<'a> {
    pub title: &'a str,
    pub list_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

/// Partial task patch. Doubly-optional fields distinguish "leave
/// untouched" (`None`) from "clear" (`Some(None)`); moving a task to a
/// different list must clear its section in the same patch.
#[derive(Serialize, Default)]
pub struct TaskPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Option<&'a str>>,
}

#[derive(Serialize)]
struct ReorderTasksArgs {
    list_id: String,
    /// None = the list's ungrouped pseudo-section.
    section_id: Option<String>,
    ordered_ids: Vec<String>,
}

fn query_string(query: &TaskQuery) -> String {
    let mut qs = format!("?filter={}", query.filter.as_str());
    if let Some(list_id) = &query.list_id {
        qs.push_str(&format!("&list_id={}", js_sys::encode_uri_component(list_id)));
    }
    if let Some(due) = query.due {
        qs.push_str(&format!("&due={due}"));
    }
    if let Some(from) = query.due_from {
        qs.push_str(&format!("&due_from={from}"));
    }
    if let Some(to) = query.due_to {
        qs.push_str(&format!("&due_to={to}"));
    }
    if let Some(q) = &query.search {
        qs.push_str(&format!("&q={}", js_sys::encode_uri_component(q)));
    }
    let sort = match query.sort {
        SortMode::Manual => "manual",
        SortMode::DueDate => "due",
    };
    qs.push_str(&format!("&sort={sort}"));
    qs
}

pub async fn list_tasks(query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
    super::get(&format!("/tasks{}", query_string(query))).await
}

pub async fn create_task(args: &CreateTaskArgs<'_>) -> Result<Task, ApiError> {
    super::validate_title(args.title)?;
    super::send("POST", "/tasks", args).await
}

pub async fn update_task(id: &str, patch: &TaskPatch<'_>) -> Result<Task, ApiError> {
    super::send("PATCH", &format!("/tasks/{id}"), patch).await
}

pub async fn delete_task(id: &str) -> Result<(), ApiError> {
    super::delete(&format!("/tasks/{id}")).await
}

/// Submit the full task order for one section container.
pub async fn reorder_tasks(
    list_id: String,
    section_id: Option<String>,
    ordered_ids: Vec<String>,
) -> Result<(), ApiError> {
    let _: serde_json::Value = super::send(
        "POST",
        "/tasks/reorder",
        &ReorderTasksArgs {
            list_id,
            section_id,
            ordered_ids,
        },
    )
    .await?;
    Ok(())
}
