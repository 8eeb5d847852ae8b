//! Manual Order Engine
//!
//! Turns a resolved drop into a deterministic command batch: an
//! attribute patch when the item changed container, then full ordered
//! id submissions for the affected containers, source first so the
//! vacated container re-packs without gaps. Full-list submission (not
//! diffs) avoids position-arithmetic edge cases.

use crate::commands::{self, ApiError, ListPatch, TaskPatch};

/// The closed set of drag outcomes, in submission order.
#[derive(Clone, Debug, PartialEq)]
pub enum DragCommand {
    MoveTask {
        task_id: String,
        to_list: String,
        to_section: Option<String>,
    },
    ReorderTasks {
        list_id: String,
        section_id: Option<String>,
        ordered_ids: Vec<String>,
    },
    MoveList {
        list_id: String,
        to_folder: Option<String>,
    },
    ReorderLists {
        folder_id: Option<String>,
        ordered_ids: Vec<String>,
    },
    ReorderSections {
        list_id: String,
        ordered_ids: Vec<String>,
    },
    ReorderFolders {
        ordered_ids: Vec<String>,
    },
}

/// A task container: one section scope (None = ungrouped) of one list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionAddr {
    pub list_id: String,
    pub section_id: Option<String>,
}

/// Splice `id` into `ids` at `index`, dropping any prior occurrence.
/// An out-of-range index appends; an empty container yields `[id]`.
fn spliced(ids: &[String], id: &str, index: usize) -> Vec<String> {
    let mut out: Vec<String> = ids.iter().filter(|x| x.as_str() != id).cloned().collect();
    let index = index.min(out.len());
    out.insert(index, id.to_string());
    out
}

fn without(ids: &[String], id: &str) -> Vec<String> {
    ids.iter().filter(|x| x.as_str() != id).cloned().collect()
}

/// Convert a drop index computed over the rendered sequence (dragged
/// item still in place) into an index over the sequence without the
/// dragged item, which is what the resolvers splice into. Dragging
/// downward past its own slot would otherwise land one row too far.
pub fn splice_index(rendered: &[String], dragged_id: &str, index: usize) -> usize {
    match rendered.iter().position(|id| id == dragged_id) {
        Some(pos) if pos < index => index - 1,
        _ => index,
    }
}

/// Resolve a task drop.
///
/// `from_order` is the source container's current rendered order
/// (dragged task included); `to_order` is the destination's rendered
/// order without the dragged task; `index` is the provisional insertion
/// index from the pointer position.
pub fn resolve_task_drop(
    task_id: &str,
    from: &SectionAddr,
    from_order: &[String],
    to: &SectionAddr,
    to_order: &[String],
    index: usize,
) -> Vec<DragCommand> {
    if from == to {
        return vec![DragCommand::ReorderTasks {
            list_id: to.list_id.clone(),
            section_id: to.section_id.clone(),
            ordered_ids: spliced(to_order, task_id, index),
        }];
    }

    vec![
        DragCommand::MoveTask {
            task_id: task_id.to_string(),
            to_list: to.list_id.clone(),
            to_section: to.section_id.clone(),
        },
        DragCommand::ReorderTasks {
            list_id: from.list_id.clone(),
            section_id: from.section_id.clone(),
            ordered_ids: without(from_order, task_id),
        },
        DragCommand::ReorderTasks {
            list_id: to.list_id.clone(),
            section_id: to.section_id.clone(),
            ordered_ids: spliced(to_order, task_id, index),
        },
    ]
}

/// Resolve a list drop across folder containers (None = the
/// folder-less siblings).
pub fn resolve_list_drop(
    list_id: &str,
    from_folder: Option<&str>,
    from_order: &[String],
    to_folder: Option<&str>,
    to_order: &[String],
    index: usize,
) -> Vec<DragCommand> {
    if from_folder == to_folder {
        return vec![DragCommand::ReorderLists {
            folder_id: to_folder.map(Into::into),
            ordered_ids: spliced(to_order, list_id, index),
        }];
    }

    vec![
        DragCommand::MoveList {
            list_id: list_id.to_string(),
            to_folder: to_folder.map(Into::into),
        },
        DragCommand::ReorderLists {
            folder_id: from_folder.map(Into::into),
            ordered_ids: without(from_order, list_id),
        },
        DragCommand::ReorderLists {
            folder_id: to_folder.map(Into::into),
            ordered_ids: spliced(to_order, list_id, index),
        },
    ]
}

/// Sections never change list by drag; one reorder suffices.
pub fn resolve_section_drop(
    section_id: &str,
    list_id: &str,
    order: &[String],
    index: usize,
) -> Vec<DragCommand> {
    vec![DragCommand::ReorderSections {
        list_id: list_id.to_string(),
        ordered_ids: spliced(order, section_id, index),
    }]
}

/// Folders reorder as one sibling set regardless of ownership.
pub fn resolve_folder_drop(folder_id: &str, order: &[String], index: usize) -> Vec<DragCommand> {
    vec![DragCommand::ReorderFolders {
        ordered_ids: spliced(order, folder_id, index),
    }]
}

/// Persist a command batch in order; the first failure aborts the rest
/// and is reported to the caller.
pub async fn submit(batch: Vec<DragCommand>) -> Result<(), ApiError> {
    for command in batch {
        match command {
            DragCommand::MoveTask {
                task_id,
                to_list,
                to_section,
            } => {
                let patch = TaskPatch {
                    list_id: Some(&to_list),
                    section_id: Some(to_section.as_deref()),
                    ..TaskPatch::default()
                };
                commands::update_task(&task_id, &patch).await?;
            }
            DragCommand::ReorderTasks {
                list_id,
                section_id,
                ordered_ids,
            } => {
                commands::reorder_tasks(list_id, section_id, ordered_ids).await?;
            }
            DragCommand::MoveList { list_id, to_folder } => {
                let patch = ListPatch {
                    folder_id: Some(to_folder.as_deref()),
                    ..ListPatch::default()
                };
                commands::update_list(&list_id, &patch).await?;
            }
            DragCommand::ReorderLists {
                folder_id,
                ordered_ids,
            } => {
                commands::reorder_lists(folder_id, ordered_ids).await?;
            }
            DragCommand::ReorderSections {
                list_id,
                ordered_ids,
            } => {
                commands::reorder_sections(list_id, ordered_ids).await?;
            }
            DragCommand::ReorderFolders { ordered_ids } => {
                commands::reorder_folders(ordered_ids).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn addr(list: &str, section: Option<&str>) -> SectionAddr {
        SectionAddr {
            list_id: list.into(),
            section_id: section.map(Into::into),
        }
    }

    #[test]
    fn test_same_container_drop_is_one_reorder() {
        let a = addr("l1", Some("s1"));
        let batch = resolve_task_drop("b", &a, &ids(&["a", "b", "c"]), &a, &ids(&["a", "c"]), 2);
        assert_eq!(
            batch,
            vec![DragCommand::ReorderTasks {
                list_id: "l1".into(),
                section_id: Some("s1".into()),
                ordered_ids: ids(&["a", "c", "b"]),
            }]
        );
    }

    #[test]
    fn test_zero_net_change_drop_is_idempotent() {
        let a = addr("l1", None);
        let batch = resolve_task_drop("b", &a, &ids(&["a", "b", "c"]), &a, &ids(&["a", "c"]), 1);
        // Submitting the current order is safe and changes nothing.
        assert_eq!(
            batch,
            vec![DragCommand::ReorderTasks {
                list_id: "l1".into(),
                section_id: None,
                ordered_ids: ids(&["a", "b", "c"]),
            }]
        );
    }

    #[test]
    fn test_cross_section_drop_patches_then_reorders_source_first() {
        let from = addr("l1", Some("s1"));
        let to = addr("l1", Some("s2"));
        let batch = resolve_task_drop(
            "b",
            &from,
            &ids(&["a", "b", "c"]),
            &to,
            &ids(&["x", "y"]),
            1,
        );
        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch[0],
            DragCommand::MoveTask {
                task_id: "b".into(),
                to_list: "l1".into(),
                to_section: Some("s2".into()),
            }
        );
        // Source re-packs without the moved task, leaving no gap.
        assert_eq!(
            batch[1],
            DragCommand::ReorderTasks {
                list_id: "l1".into(),
                section_id: Some("s1".into()),
                ordered_ids: ids(&["a", "c"]),
            }
        );
        assert_eq!(
            batch[2],
            DragCommand::ReorderTasks {
                list_id: "l1".into(),
                section_id: Some("s2".into()),
                ordered_ids: ids(&["x", "b", "y"]),
            }
        );
    }

    #[test]
    fn test_cross_list_drop_clears_section_via_move() {
        let from = addr("l1", Some("s1"));
        let to = addr("l2", None);
        let batch = resolve_task_drop("t", &from, &ids(&["t"]), &to, &[], 0);
        assert_eq!(
            batch[0],
            DragCommand::MoveTask {
                task_id: "t".into(),
                to_list: "l2".into(),
                to_section: None,
            }
        );
        // Empty destination is a valid target: the item becomes its
        // sole member.
        assert_eq!(
            batch[2],
            DragCommand::ReorderTasks {
                list_id: "l2".into(),
                section_id: None,
                ordered_ids: ids(&["t"]),
            }
        );
    }

    #[test]
    fn test_list_drop_across_folders() {
        let batch = resolve_list_drop(
            "groceries",
            Some("home"),
            &ids(&["groceries", "chores"]),
            None,
            &ids(&["work"]),
            1,
        );
        assert_eq!(
            batch,
            vec![
                DragCommand::MoveList {
                    list_id: "groceries".into(),
                    to_folder: None,
                },
                DragCommand::ReorderLists {
                    folder_id: Some("home".into()),
                    ordered_ids: ids(&["chores"]),
                },
                DragCommand::ReorderLists {
                    folder_id: None,
                    ordered_ids: ids(&["work", "groceries"]),
                },
            ]
        );
    }

    #[test]
    fn test_downward_drag_lands_before_hovered_row() {
        // Dragging "a" over the upper half of "c" in [a, b, c]: the
        // hover math yields rendered index 2, but among the remaining
        // siblings [b, c] the slot before "c" is 1.
        let rendered = ids(&["a", "b", "c"]);
        let index = splice_index(&rendered, "a", 2);
        assert_eq!(index, 1);

        let a = addr("l1", None);
        let batch = resolve_task_drop("a", &a, &rendered, &a, &ids(&["b", "c"]), index);
        assert_eq!(
            batch,
            vec![DragCommand::ReorderTasks {
                list_id: "l1".into(),
                section_id: None,
                ordered_ids: ids(&["b", "a", "c"]),
            }]
        );
    }

    #[test]
    fn test_upward_drag_index_is_unchanged() {
        // "c" dragged above "b": its own position is past the slot.
        assert_eq!(splice_index(&ids(&["a", "b", "c"]), "c", 1), 1);
    }

    #[test]
    fn test_cross_container_index_is_unchanged() {
        // Dragged item absent from the destination's rendered order.
        assert_eq!(splice_index(&ids(&["x", "y"]), "a", 1), 1);
    }

    #[test]
    fn test_out_of_range_index_appends() {
        let batch = resolve_section_drop("s1", "l1", &ids(&["s2", "s3"]), 99);
        assert_eq!(
            batch,
            vec![DragCommand::ReorderSections {
                list_id: "l1".into(),
                ordered_ids: ids(&["s2", "s3", "s1"]),
            }]
        );
    }

    #[test]
    fn test_folder_reorder_is_one_sibling_set() {
        let batch = resolve_folder_drop("f2", &ids(&["f1", "f3"]), 0);
        assert_eq!(
            batch,
            vec![DragCommand::ReorderFolders {
                ordered_ids: ids(&["f2", "f1", "f3"]),
            }]
        );
    }
}
