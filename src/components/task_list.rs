//! Task List View
//!
//! Renders the active scope as collapsible groups: date buckets under
//! due-date sort, section groups under manual sort on a list scope.
//! Completed tasks always render last as their own group.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_gestures::{insertion_index, make_on_mousedown, DropSpot};

use crate::app::{SectionDrag, TaskDrag};
use crate::commands::{self, CreateSectionArgs, SectionPatch};
use crate::components::{DeleteConfirm, TaskRow};
use crate::context::{use_app_context, ComposerTarget};
use crate::hierarchy;
use crate::models::{validate_title, SortMode, Task};
use crate::query::{self, TaskGroup, UNGROUPED_KEY};
use crate::order::SectionAddr;
use crate::scope::Scope;
use crate::settings;
use crate::store::{
    store_sections_of, store_sort_mode, store_toggle_collapsed, use_app_store,
    AppStateStoreFields,
};

/// The task container a group key addresses, when it is one. Bucket
/// and completed groups are not drop targets.
fn group_addr(key: &str, list_id: &str) -> Option<SectionAddr> {
    if key == UNGROUPED_KEY {
        return Some(SectionAddr {
            list_id: list_id.to_string(),
            section_id: None,
        });
    }
    key.strip_prefix("section:").map(|id| SectionAddr {
        list_id: list_id.to_string(),
        section_id: Some(id.to_string()),
    })
}

#[component]
fn SectionHeaderActions(section_id: String, list_id: String) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let rename_id = section_id.clone();
    let rename_list = list_id.clone();
    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(title) = validate_title(&draft.get()).map(str::to_string) else {
            return;
        };
        let id = rename_id.clone();
        let list_id = rename_list.clone();
        spawn_local(async move {
            let patch = SectionPatch {
                title: Some(&title),
            };
            match commands::update_section(&id, &patch).await {
                Ok(_) => {
                    let _ = hierarchy::refresh_sections(&store, &list_id).await;
                    ctx.reload();
                }
                Err(e) => ctx.report_failure("renaming section", &e),
            }
        });
        set_editing.set(false);
    };

    let delete_id = section_id.clone();
    let delete_list = list_id;

    view! {
        <Show
            when=move || editing.get()
            fallback=move || {
                view! {
                    <button class="icon-btn" on:click=move |_| set_editing.set(true)>
                        "Rename"
                    </button>
                }
            }
        >
            <form class="rename-form" on:submit=rename.clone()>
                <input
                    type="text"
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_draft.set(input.value());
                    }
                />
            </form>
        </Show>
        <DeleteConfirm
            button_class="icon-btn"
            on_confirm=Callback::new(move |_| {
                let id = delete_id.clone();
                let list_id = delete_list.clone();
                spawn_local(async move {
                    // Its tasks fall back to the list's ungrouped area.
                    match commands::delete_section(&id).await {
                        Ok(()) => {
                            let _ = hierarchy::refresh_sections(&store, &list_id).await;
                        }
                        Err(e) => ctx.report_failure("deleting section", &e),
                    }
                    ctx.reload();
                });
            })
        />
    }
}

#[component]
fn GroupBlock(
    group: TaskGroup,
    group_index: usize,
    /// Set for manual list scopes; enables drops and section tooling.
    list_id: Option<String>,
    set_editing_task: WriteSignal<Option<Task>>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let task_drag = expect_context::<TaskDrag>().0;
    let section_drag = expect_context::<SectionDrag>().0;

    let key = group.key.clone();
    let label = group.label.clone();
    let addr = list_id
        .as_deref()
        .and_then(|lid| group_addr(&group.key, lid));
    let section_id = addr.as_ref().and_then(|a| a.section_id.clone());

    let collapsed = {
        let key = key.clone();
        move || store.collapsed().read().contains(&key)
    };

    let toggle_key = key.clone();
    let toggle = move |_| {
        let set = store_toggle_collapsed(&store, &toggle_key);
        settings::save_collapsed(&ctx.scope.get_untracked().storage_key(), &set);
    };

    // Section headers reorder by drag; only real sections arm it.
    let header_mousedown = section_id.clone().zip(list_id.clone()).map(|(sid, _)| {
        make_on_mousedown(section_drag, sid)
    });
    let hover_section = section_id.clone();
    let hover_list = list_id.clone();
    let header_mousemove = move |ev: web_sys::MouseEvent| {
        let (Some(_), Some(lid)) = (&hover_section, &hover_list) else {
            return;
        };
        if section_drag.dragging_read.get_untracked().is_some() {
            // Ungrouped renders at group index 0, so this section's
            // index among its siblings is group_index - 1.
            let sibling_index = group_index.saturating_sub(1);
            let mid = ev
                .current_target()
                .and_then(|t| {
                    t.dyn_ref::<web_sys::Element>().map(|e| e.get_bounding_client_rect())
                })
                .map(|rect| rect.top() + rect.height() / 2.0);
            let index = match mid {
                Some(mid) => sibling_index + insertion_index(f64::from(ev.client_y()), &[mid]),
                None => sibling_index,
            };
            section_drag
                .drop_spot_write
                .set(Some(DropSpot {
                    container: lid.clone(),
                    index,
                }));
        }
    };

    // An empty group body is still a drop target for tasks.
    let empty_addr = addr.clone();
    let group_is_empty = group.tasks.is_empty();
    let body_mousemove = move |_ev: web_sys::MouseEvent| {
        let Some(a) = &empty_addr else { return };
        if group_is_empty && task_drag.dragging_read.get_untracked().is_some() {
            task_drag
                .drop_spot_write
                .set(Some(DropSpot {
                    container: a.clone(),
                    index: 0,
                }));
        }
    };

    let compose_addr = addr.clone();
    let compose_here = compose_addr.map(|a| {
        view! {
            <button
                class="icon-btn"
                on:click=move |_| {
                    ctx.set_composer_target(Some(ComposerTarget {
                        list_id: a.list_id.clone(),
                        section_id: a.section_id.clone(),
                    }));
                }
            >
                "+"
            </button>
        }
    });

    let section_tools = section_id.clone().zip(list_id).map(|(sid, lid)| {
        view! { <SectionHeaderActions section_id=sid list_id=lid /> }
    });

    let rows_addr = addr.clone();
    let tasks = group.tasks.clone();
    let count = tasks.len();

    view! {
        <section class="task-group">
            <header
                class="group-header"
                on:mousedown=move |ev| {
                    if let Some(arm) = &header_mousedown {
                        arm(ev);
                    }
                }
                on:mousemove=header_mousemove
            >
                <button class="collapse-btn" on:click=toggle>
                    {
                        let collapsed = collapsed.clone();
                        move || if collapsed() { "\u{25b8}" } else { "\u{25be}" }
                    }
                </button>
                <span class="group-label">{label}</span>
                <span class="group-count">{count}</span>
                {compose_here}
                {section_tools}
            </header>
            <Show when=move || !collapsed()>
                <div class="group-body" on:mousemove=body_mousemove.clone()>
                    {tasks
                        .iter()
                        .enumerate()
                        .map(|(i, task)| {
                            view! {
                                <TaskRow
                                    task=task.clone()
                                    drop_addr=rows_addr.clone()
                                    row_index=i
                                    set_editing_task=set_editing_task
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </section>
    }
}

#[component]
pub fn TaskListView(set_editing_task: WriteSignal<Option<Task>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (new_section_title, set_new_section_title) = signal(String::new());

    // Group model is recomputed from the store snapshot; the store is
    // refreshed by the scope-load effect.
    let groups = move || {
        let scope = ctx.scope.get();
        let sort = store_sort_mode(&store);
        let tasks = store.active_tasks().read().clone();
        let sections = match &scope {
            Scope::List(list_id) => store_sections_of(&store, list_id).unwrap_or_default(),
            Scope::Smart(_) => Vec::new(),
        };
        query::build_groups(&scope, sort, &tasks, &sections, Local::now().date_naive())
    };

    let manual_list_id = move || {
        let scope = ctx.scope.get();
        match (&scope, scope.effective_sort(store_sort_mode(&store))) {
            (Scope::List(id), SortMode::Manual) => Some(id.clone()),
            _ => None,
        }
    };

    let completed_group = move || {
        let completed = store.completed_tasks().read().clone();
        TaskGroup {
            key: query::COMPLETED_KEY.to_string(),
            label: "Completed".to_string(),
            tasks: completed,
        }
    };

    let create_section = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(list_id) = manual_list_id() else {
            return;
        };
        let Some(title) = validate_title(&new_section_title.get()).map(str::to_string) else {
            return;
        };
        spawn_local(async move {
            let args = CreateSectionArgs {
                list_id: &list_id,
                title: &title,
            };
            match commands::create_section(&args).await {
                Ok(_) => {
                    set_new_section_title.set(String::new());
                    let _ = hierarchy::refresh_sections(&store, &list_id).await;
                    ctx.reload();
                }
                Err(e) => ctx.report_failure("adding section", &e),
            }
        });
    };

    view! {
        <div class="task-list">
            {move || {
                let list_id = manual_list_id();
                groups()
                    .into_iter()
                    .enumerate()
                    .map(|(i, group)| {
                        view! {
                            <GroupBlock
                                group=group
                                group_index=i
                                list_id=list_id.clone()
                                set_editing_task=set_editing_task
                            />
                        }
                    })
                    .collect_view()
            }}

            {move || {
                manual_list_id()
                    .map(|_| {
                        view! {
                            <form class="new-section-form" on:submit=create_section>
                                <input
                                    type="text"
                                    placeholder="New section..."
                                    prop:value=move || new_section_title.get()
                                    on:input=move |ev| {
                                        let target = ev.target().unwrap();
                                        let input = target
                                            .dyn_ref::<web_sys::HtmlInputElement>()
                                            .unwrap();
                                        set_new_section_title.set(input.value());
                                    }
                                />
                                <button type="submit">"Add section"</button>
                            </form>
                        }
                    })
            }}

            {move || {
                let group = completed_group();
                (!group.tasks.is_empty())
                    .then(|| {
                        view! {
                            <GroupBlock
                                group=group
                                group_index=0
                                list_id=None
                                set_editing_task=set_editing_task
                            />
                        }
                    })
            }}
        </div>
    }
}
