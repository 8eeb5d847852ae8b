//! Ticklist Frontend App
//!
//! Main application component: owns the store, the app context, and
//! the four drag channels (tasks, lists, sections, folders). Every
//! successful mutation bumps the reload trigger, which re-runs the
//! scope load and the aggregate counts.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use wasm_bindgen::JsCast;

use leptos_gestures::{bind_global_mouseup, create_drag_signals, DragSignals, DropSpot};

use crate::components::{CalendarView, OpenSwipeRow, Sidebar, TaskComposer, TaskEditor, TaskListView};
use crate::context::{AppContext, ComposerTarget};
use crate::counts;
use crate::hierarchy;
use crate::models::Task;
use crate::order::{self, SectionAddr};
use crate::query;
use crate::scope::{Scope, SmartView};
use crate::settings;
use crate::store::{
    store_folder_order, store_list_order, store_section_order, store_set_collapsed,
    store_task_by_id, store_task_order, AppState, AppStore,
};

/// Drag channel for task rows (container = one section of one list)
#[derive(Clone, Copy)]
pub struct TaskDrag(pub DragSignals<String, SectionAddr>);

/// Drag channel for lists (container = a folder, None = folder-less)
#[derive(Clone, Copy)]
pub struct ListDrag(pub DragSignals<String, Option<String>>);

/// Drag channel for sections (container = the owning list)
#[derive(Clone, Copy)]
pub struct SectionDrag(pub DragSignals<String, String>);

/// Drag channel for folders (one sibling set)
#[derive(Clone, Copy)]
pub struct FolderDrag(pub DragSignals<String, ()>);

#[component]
pub fn App() -> impl IntoView {
    let store: AppStore = Store::new(AppState {
        sort_mode: settings::load_sort_mode(),
        ..Default::default()
    });
    provide_context(store);

    // State
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (scope, set_scope) = signal(Scope::Smart(SmartView::Today));
    let (search, set_search) = signal(String::new());
    let (composer_target, set_composer_target) = signal(None::<ComposerTarget>);
    let (editing_task, set_editing_task) = signal(None::<Task>);
    let (show_calendar, set_show_calendar) = signal(false);
    let (theme, set_theme) = signal(settings::load_theme());
    let (last_error, set_last_error) = signal(None::<String>);

    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (scope, set_scope),
        (search, set_search),
        (composer_target, set_composer_target),
        (last_error, set_last_error),
    );
    provide_context(ctx);
    provide_context(OpenSwipeRow(RwSignal::new(None)));

    // Drag channels. The drop handlers read the current rendered
    // orders from the store, resolve the command batch, and persist it;
    // the pointer state is already resolved by the time we get here.
    let task_drag = TaskDrag(create_drag_signals());
    provide_context(task_drag);
    bind_global_mouseup(task_drag.0, move |task_id: String, spot: DropSpot<SectionAddr>| {
        let Some(task) = store_task_by_id(&store, &task_id) else {
            return;
        };
        let from = SectionAddr {
            list_id: task.list_id.clone(),
            section_id: task.section_key().map(Into::into),
        };
        let from_order = store_task_order(&store, &from.list_id, from.section_id.as_deref());
        let mut to_order = store_task_order(
            &store,
            &spot.container.list_id,
            spot.container.section_id.as_deref(),
        );
        let index = order::splice_index(&to_order, &task_id, spot.index);
        to_order.retain(|id| id != &task_id);
        let batch = order::resolve_task_drop(
            &task_id,
            &from,
            &from_order,
            &spot.container,
            &to_order,
            index,
        );
        spawn_local(async move {
            if let Err(e) = order::submit(batch).await {
                ctx.report_failure("saving task order", &e);
            }
            ctx.reload();
        });
    });

    let list_drag = ListDrag(create_drag_signals());
    provide_context(list_drag);
    bind_global_mouseup(list_drag.0, move |list_id: String, spot: DropSpot<Option<String>>| {
        let from_folder = crate::store::store_list_by_id(&store, &list_id)
            .and_then(|l| l.folder_id);
        let from_order = store_list_order(&store, from_folder.as_deref());
        let mut to_order = store_list_order(&store, spot.container.as_deref());
        let index = order::splice_index(&to_order, &list_id, spot.index);
        to_order.retain(|id| id != &list_id);
        let batch = order::resolve_list_drop(
            &list_id,
            from_folder.as_deref(),
            &from_order,
            spot.container.as_deref(),
            &to_order,
            index,
        );
        spawn_local(async move {
            if let Err(e) = order::submit(batch).await {
                ctx.report_failure("saving list order", &e);
            }
            ctx.reload();
        });
    });

    let section_drag = SectionDrag(create_drag_signals());
    provide_context(section_drag);
    bind_global_mouseup(section_drag.0, move |section_id: String, spot: DropSpot<String>| {
        let list_id = spot.container.clone();
        let order_ids = store_section_order(&store, &list_id);
        let index = order::splice_index(&order_ids, &section_id, spot.index);
        let batch = order::resolve_section_drop(&section_id, &list_id, &order_ids, index);
        spawn_local(async move {
            if let Err(e) = order::submit(batch).await {
                ctx.report_failure("saving section order", &e);
            }
            // Section order lives in the per-list cache; overwrite it.
            let _ = hierarchy::refresh_sections(&store, &list_id).await;
            ctx.reload();
        });
    });

    let folder_drag = FolderDrag(create_drag_signals());
    provide_context(folder_drag);
    bind_global_mouseup(folder_drag.0, move |folder_id: String, spot: DropSpot<()>| {
        let order_ids = store_folder_order(&store);
        let index = order::splice_index(&order_ids, &folder_id, spot.index);
        let batch = order::resolve_folder_drop(&folder_id, &order_ids, index);
        spawn_local(async move {
            if let Err(e) = order::submit(batch).await {
                ctx.report_failure("saving folder order", &e);
            }
            ctx.reload();
        });
    });

    // Load hierarchy + counts on mount and after every mutation
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        spawn_local(async move {
            if let Err(e) = hierarchy::load_all(&store).await {
                // Previous snapshot stays in place.
                ctx.report_failure("loading lists", &e);
            }
            counts::refresh(&store, Local::now().date_naive()).await;
        });
    });

    // Load the scope window when scope, search, or trigger changes
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        let current = scope.get();
        let q = search.get();
        spawn_local(async move {
            if let Err(e) = query::load_scope(&store, &current, &q, Local::now().date_naive()).await
            {
                // Stale data stays visible; never clear the store here.
                ctx.report_failure("loading tasks", &e);
            }
        });
    });

    // Swap in the persisted collapse set when the scope changes
    Effect::new(move |_| {
        let current = scope.get();
        store_set_collapsed(&store, settings::load_collapsed(&current.storage_key()));
    });

    // Reflect the theme preference onto <body> so CSS can key off it
    Effect::new(move |_| {
        let current = theme.get();
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.set_attribute("data-theme", &current);
        }
    });

    let cycle_theme = move |_| {
        let next = match theme.get_untracked().as_str() {
            "system" => "light",
            "light" => "dark",
            _ => "system",
        };
        settings::save_theme(next);
        set_theme.set(next.to_string());
    };

    view! {
        <div class="app-layout">
            <Sidebar />

            <main class="main-content">
                {move || {
                    ctx.last_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="error-banner">
                                    <span class="error-text">{message}</span>
                                    <button
                                        class="dismiss-btn"
                                        on:click=move |_| ctx.clear_error()
                                    >
                                        "Dismiss"
                                    </button>
                                </div>
                            }
                        })
                }}
                <header class="topbar">
                    <input
                        class="search-input"
                        type="search"
                        placeholder="Search tasks..."
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_search.set(input.value());
                        }
                    />
                    <button
                        class=move || if show_calendar.get() { "view-btn active" } else { "view-btn" }
                        on:click=move |_| set_show_calendar.update(|v| *v = !*v)
                    >
                        "Calendar"
                    </button>
                    <button class="view-btn" on:click=cycle_theme>
                        {move || format!("Theme: {}", theme.get())}
                    </button>
                </header>

                <Show when=move || !show_calendar.get()>
                    <TaskComposer />
                    <TaskListView set_editing_task=set_editing_task />
                </Show>
                <Show when=move || show_calendar.get()>
                    <CalendarView set_show_calendar=set_show_calendar />
                </Show>
            </main>

            {move || {
                editing_task
                    .get()
                    .map(|task| view! { <TaskEditor task=task set_editing_task=set_editing_task /> })
            }}
        </div>
    }
}
