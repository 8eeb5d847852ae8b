//! Section Commands
//!
//! Sections are scoped to their owning list for both listing and
//! reordering.

use serde::Serialize;

use super::ApiError;
use crate::models::Section;

#[derive(Serialize)]
pub struct CreateSectionArgs<'a> {
    pub list_id: &'a str,
    pub title: &'a str,
}

#[derive(Serialize, Default)]
pub struct SectionPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
}

#[derive(Serialize)]
struct ReorderSectionsArgs {
    list_id: String,
    ordered_ids: Vec<String>,
}

pub async fn list_sections(list_id: &str) -> Result<Vec<Section>, ApiError> {
    super::get(&format!("/lists/{list_id}/sections")).await
}

pub async fn create_section(args: &CreateSectionArgs<'_>) -> Result<Section, ApiError> {
    super::validate_title(args.title)?;
    super::send("POST", "/sections", args).await
}

pub async fn update_section(id: &str, patch: &SectionPatch<'_>) -> Result<Section, ApiError> {
    super::send("PATCH", &format!("/sections/{id}"), patch).await
}

pub async fn delete_section(id: &str) -> Result<(), ApiError> {
    super::delete(&format!("/sections/{id}")).await
}

/// Submit the full explicit-section order for one list.
pub async fn reorder_sections(list_id: String, ordered_ids: Vec<String>) -> Result<(), ApiError> {
    let _: serde_json::Value = super::send(
        "POST",
        "/sections/reorder",
        &ReorderSectionsArgs {
            list_id,
            ordered_ids,
        },
    )
    .await?;
    Ok(())
}
