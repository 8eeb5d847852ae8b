//! Task Composer
//!
//! The quick-add bar. New tasks file into the composer target when one
//! is set (the "+" on a section header), otherwise into the scoped
//! list, otherwise into Inbox.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands::{self, CreateTaskArgs};
use crate::context::use_app_context;
use crate::models::{validate_title, TITLE_MAX_LEN};
use crate::scope::Scope;
use crate::store::{store_inbox_id, use_app_store};

#[component]
pub fn TaskComposer() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (title, set_title) = signal(String::new());
    let (due_raw, set_due_raw) = signal(String::new());
    let (priority, set_priority) = signal(0u8);

    let title_too_long = move || title.get().trim().chars().count() > TITLE_MAX_LEN;

    let target = move || {
        if let Some(t) = ctx.composer_target.get() {
            return (t.list_id, t.section_id);
        }
        match ctx.scope.get() {
            Scope::List(list_id) => (list_id, None),
            Scope::Smart(_) => (store_inbox_id(&store), None),
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = title.get();
        let Some(valid) = validate_title(&raw).map(str::to_string) else {
            return;
        };
        let due = NaiveDate::parse_from_str(&due_raw.get(), "%Y-%m-%d").ok();
        let prio = priority.get();
        let (list_id, section_id) = target();
        spawn_local(async move {
            let args = CreateTaskArgs {
                title: &valid,
                list_id: &list_id,
                section_id: section_id.as_deref(),
                notes: None,
                due_date: due,
                tags: Vec::new(),
                priority: (prio > 0).then_some(prio),
            };
            match commands::create_task(&args).await {
                Ok(_) => {
                    set_title.set(String::new());
                    set_due_raw.set(String::new());
                    set_priority.set(0);
                    ctx.reload();
                }
                Err(e) => ctx.report_failure("adding task", &e),
            }
        });
    };

    view! {
        <form class="task-composer" on:submit=on_submit>
            <input
                class="composer-title"
                type="text"
                placeholder="Add a task..."
                prop:value=move || title.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_title.set(input.value());
                }
            />
            <input
                class="composer-due"
                type="date"
                prop:value=move || due_raw.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_due_raw.set(input.value());
                }
            />
            <select
                class="composer-priority"
                on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    set_priority.set(select.value().parse().unwrap_or(0));
                }
            >
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
            <button type="submit" disabled=title_too_long>
                "Add"
            </button>
            <Show when=title_too_long>
                <span class="composer-hint">"Title is limited to 200 characters"</span>
            </Show>
            {move || {
                ctx.composer_target
                    .get()
                    .map(|_| {
                        view! {
                            <button
                                type="button"
                                class="composer-target-clear"
                                on:click=move |_| ctx.set_composer_target(None)
                            >
                                "Filing into section \u{00d7}"
                            </button>
                        }
                    })
            }}
        </form>
    }
}
