//! List Commands

use serde::Serialize;

use super::ApiError;
use crate::models::List;

#[derive(Serialize)]
pub struct CreateListArgs<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<&'a str>,
}

/// Partial list patch. `folder_id` is doubly optional: `Some(None)`
/// clears the owning folder, `None` leaves it untouched.
#[derive(Serialize, Default)]
pub struct ListPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Option<&'a str>>,
}

#[derive(Serialize)]
struct ReorderListsArgs {
    folder_id: Option<String>,
    ordered_ids: Vec<String>,
}

pub async fn list_lists() -> Result<Vec<List>, ApiError> {
    super::get("/lists").await
}

pub async fn create_list(args: &CreateListArgs<'_>) -> Result<List, ApiError> {
    super::validate_title(args.title)?;
    super::send("POST", "/lists", args).await
}

pub async fn update_list(id: &str, patch: &ListPatch<'_>) -> Result<List, ApiError> {
    super::send("PATCH", &format!("/lists/{id}"), patch).await
}

/// The Inbox is exempt server-side; deleting any other list reassigns
/// its tasks to the Inbox.
pub async fn delete_list(id: &str) -> Result<(), ApiError> {
    super::delete(&format!("/lists/{id}")).await
}

/// Submit the full list order within one folder scope (None = the
/// folder-less siblings).
pub async fn reorder_lists(
    folder_id: Option<String>,
    ordered_ids: Vec<String>,
) -> Result<(), ApiError> {
    let _: serde_json::Value = super::send(
        "POST",
        "/lists/reorder",
        &ReorderListsArgs {
            folder_id,
            ordered_ids,
        },
    )
    .await?;
    Ok(())
}
