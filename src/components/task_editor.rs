//! Task Editor
//!
//! Detail panel for one task. Title and notes save on a 400ms debounce
//! with a generation counter so only the latest keystroke's timer
//! fires; structured fields (due, priority, list, tags) patch
//! immediately.

use chrono::NaiveDate;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, TaskPatch};
use crate::components::DeleteConfirm;
use crate::context::use_app_context;
use crate::models::{validate_title, Task};
use crate::store::{store_lists, use_app_store};

const DEBOUNCE_MS: u32 = 400;

#[component]
pub fn TaskEditor(task: Task, set_editing_task: WriteSignal<Option<Task>>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let report = move |e: &crate::commands::ApiError| ctx.report_failure("saving task", e);

    let task_id = task.id.clone();

    let title = RwSignal::new(task.title.clone());
    let notes = RwSignal::new(task.notes.clone().unwrap_or_default());
    let due_raw = RwSignal::new(
        task.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    let priority = RwSignal::new(task.priority);
    let tags_raw = RwSignal::new(task.tags.join(", "));
    let list_id = RwSignal::new(task.list_id.clone());

    // Debounce generation: a newer keystroke invalidates older timers.
    let text_gen = RwSignal::new(0u32);

    let debounce_id = task_id.clone();
    let schedule_text_save = move || {
        let generation = text_gen.get_untracked() + 1;
        text_gen.set(generation);
        let id = debounce_id.clone();
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if text_gen.get_untracked() != generation {
                return;
            }
            let raw_title = title.get_untracked();
            let Some(valid) = validate_title(&raw_title).map(str::to_string) else {
                // Invalid drafts stay local until corrected.
                return;
            };
            let raw_notes = notes.get_untracked();
            let patch = TaskPatch {
                title: Some(&valid),
                notes: Some((!raw_notes.trim().is_empty()).then_some(raw_notes.trim())),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => report(&e),
            }
        });
    };

    let due_id = task_id.clone();
    let save_due = move |value: String| {
        due_raw.set(value.clone());
        let due = NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok();
        let id = due_id.clone();
        spawn_local(async move {
            let patch = TaskPatch {
                due_date: Some(due),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => report(&e),
            }
        });
    };

    let priority_id = task_id.clone();
    let save_priority = move |value: u8| {
        priority.set(value);
        let id = priority_id.clone();
        spawn_local(async move {
            let patch = TaskPatch {
                priority: Some(value),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => report(&e),
            }
        });
    };

    let tags_id = task_id.clone();
    let save_tags = move || {
        let raw = tags_raw.get_untracked();
        // Split, trim, dedupe; order is not meaningful.
        let mut tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        tags.sort();
        tags.dedup();
        let id = tags_id.clone();
        spawn_local(async move {
            let patch = TaskPatch {
                tags: Some(tags),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => report(&e),
            }
        });
    };

    let move_id = task_id.clone();
    let save_list = move |to_list: String| {
        list_id.set(to_list.clone());
        let id = move_id.clone();
        spawn_local(async move {
            // Sections are list-local; moving list clears the section.
            let patch = TaskPatch {
                list_id: Some(&to_list),
                section_id: Some(None),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => report(&e),
            }
        });
    };

    let delete_id = task_id.clone();

    view! {
        <aside class="task-editor">
            <header class="editor-header">
                <button class="close-btn" on:click=move |_| set_editing_task.set(None)>
                    "\u{00d7}"
                </button>
                <DeleteConfirm
                    button_class="delete-btn"
                    on_confirm=Callback::new(move |_| {
                        let id = delete_id.clone();
                        spawn_local(async move {
                            match commands::delete_task(&id).await {
                                Ok(()) => {
                                    set_editing_task.set(None);
                                    ctx.reload();
                                }
                                Err(e) => ctx.report_failure("deleting task", &e),
                            }
                        });
                    })
                />
            </header>

            <input
                class="editor-title"
                type="text"
                prop:value=move || title.get()
                on:input={
                    let schedule = schedule_text_save.clone();
                    move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        title.set(input.value());
                        schedule();
                    }
                }
            />

            <textarea
                class="editor-notes"
                placeholder="Notes..."
                prop:value=move || notes.get()
                on:input={
                    let schedule = schedule_text_save.clone();
                    move |ev| {
                        let target = ev.target().unwrap();
                        let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                        notes.set(area.value());
                        schedule();
                    }
                }
            />

            <label class="editor-field">
                "Due"
                <input
                    type="date"
                    prop:value=move || due_raw.get()
                    on:input={
                        let save_due = save_due.clone();
                        move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            save_due(input.value());
                        }
                    }
                />
            </label>

            <label class="editor-field">
                "Priority"
                <select on:change={
                    let save_priority = save_priority.clone();
                    move |ev| {
                        let target = ev.target().unwrap();
                        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                        save_priority(select.value().parse().unwrap_or(0));
                    }
                }>
                    <option value="0" selected=move || priority.get() == 0>
                        "No priority"
                    </option>
                    <option value="1" selected=move || priority.get() == 1>
                        "Low"
                    </option>
                    <option value="2" selected=move || priority.get() == 2>
                        "Medium"
                    </option>
                    <option value="3" selected=move || priority.get() == 3>
                        "High"
                    </option>
                </select>
            </label>

            <label class="editor-field">
                "List"
                <select on:change={
                    let save_list = save_list.clone();
                    move |ev| {
                        let target = ev.target().unwrap();
                        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                        save_list(select.value());
                    }
                }>
                    {move || {
                        store_lists(&store)
                            .into_iter()
                            .map(|list| {
                                let selected = list.id == list_id.get();
                                view! {
                                    <option value=list.id.clone() selected=selected>
                                        {list.title.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>

            <label class="editor-field">
                "Tags"
                <input
                    type="text"
                    placeholder="comma, separated"
                    prop:value=move || tags_raw.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        tags_raw.set(input.value());
                    }
                    on:change={
                        let save_tags = save_tags.clone();
                        move |_| save_tags()
                    }
                />
            </label>
        </aside>
    }
}
