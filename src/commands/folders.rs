//! Folder Commands

use serde::Serialize;

use super::ApiError;
use crate::models::Folder;

#[derive(Serialize)]
pub struct CreateFolderArgs<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'a str>,
}

/// Partial folder patch; absent fields are left untouched.
#[derive(Serialize, Default)]
pub struct FolderPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<&'a str>,
}

#[derive(Serialize)]
struct ReorderArgs {
    ordered_ids: Vec<String>,
}

pub async fn list_folders() -> Result<Vec<Folder>, ApiError> {
    super::get("/folders").await
}

pub async fn create_folder(args: &CreateFolderArgs<'_>) -> Result<Folder, ApiError> {
    super::validate_title(args.title)?;
    super::send("POST", "/folders", args).await
}

pub async fn update_folder(id: &str, patch: &FolderPatch<'_>) -> Result<Folder, ApiError> {
    super::send("PATCH", &format!("/folders/{id}"), patch).await
}

/// Deleting a folder never deletes its lists; they become folder-less.
pub async fn delete_folder(id: &str) -> Result<(), ApiError> {
    super::delete(&format!("/folders/{id}")).await
}

/// Submit the full sibling order for all folders.
pub async fn reorder_folders(ordered_ids: Vec<String>) -> Result<(), ApiError> {
    let _: serde_json::Value = super::send("POST", "/folders/reorder", &ReorderArgs { ordered_ids }).await?;
    Ok(())
}
