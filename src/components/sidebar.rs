//! Sidebar
//!
//! Smart views with count badges, the folder/list tree, creation
//! forms, and drag-to-reorder for folders and lists. Folders and lists
//! are always manually ordered.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_gestures::{insertion_index, make_on_mousedown, DropSpot};

use crate::app::{FolderDrag, ListDrag};
use crate::commands::{self, CreateFolderArgs, CreateListArgs};
use crate::components::DeleteConfirm;
use crate::context::use_app_context;
use crate::models::{Folder, List};
use crate::scope::{Scope, SmartView};
use crate::settings;
use crate::store::{
    store_counts, store_detach_folder, store_lists, store_set_sort_mode, store_sort_mode,
    use_app_store, AppStateStoreFields,
};
use crate::models::SortMode;

/// Insertion index for a pointer hovering a row: before or after the
/// row depending on which half of it the pointer is in.
fn hover_index(ev: &web_sys::MouseEvent, row_index: usize) -> usize {
    let mid = ev
        .current_target()
        .and_then(|t| t.dyn_ref::<web_sys::Element>().map(|e| e.get_bounding_client_rect()))
        .map(|rect| rect.top() + rect.height() / 2.0);
    match mid {
        Some(mid) => row_index + insertion_index(f64::from(ev.client_y()), &[mid]),
        None => row_index,
    }
}

fn smart_button(
    label: &'static str,
    view: SmartView,
    count: impl Fn() -> usize + Send + Sync + 'static,
) -> impl IntoView {
    let ctx = use_app_context();
    let is_active = move || ctx.scope.get() == Scope::Smart(view);
    view! {
        <button
            class=move || if is_active() { "nav-row active" } else { "nav-row" }
            on:click=move |_| ctx.select_scope(Scope::Smart(view))
        >
            <span class="nav-label">{label}</span>
            <span class="nav-count">{move || count()}</span>
        </button>
    }
}

#[component]
fn ListRow(list: List, row_index: usize) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let list_drag = expect_context::<ListDrag>().0;

    let id = list.id.clone();
    let folder_id = list.folder_id.clone();
    let title = list.title.clone();
    let emoji = list.emoji.clone().unwrap_or_default();
    let is_inbox = list.is_inbox();

    let scope_id = id.clone();
    let is_active = move || ctx.scope.get() == Scope::List(scope_id.clone());

    let arm = make_on_mousedown(list_drag, id.clone());
    let hover_id = id.clone();
    let hover_folder = folder_id.clone();
    let on_hover = move |ev: web_sys::MouseEvent| {
        if let Some(dragging) = list_drag.dragging_read.get_untracked() {
            if dragging != hover_id {
                list_drag
                    .drop_spot_write
                    .set(Some(DropSpot {
                        container: hover_folder.clone(),
                        index: hover_index(&ev, row_index),
                    }));
            }
        }
    };

    let select_id = id.clone();
    let delete_id = id.clone();
    let count_id = id.clone();

    view! {
        <div
            class=move || if is_active() { "nav-row list-row active" } else { "nav-row list-row" }
            on:mousedown=arm
            on:mousemove=on_hover
            on:click=move |_| ctx.select_scope(Scope::List(select_id.clone()))
        >
            <span class="nav-emoji">{emoji}</span>
            <span class="nav-label">{title}</span>
            <span class="nav-count">
                {move || {
                    store_counts(&store)
                        .per_list
                        .get(&count_id)
                        .copied()
                        .unwrap_or(0)
                }}
            </span>
            {(!is_inbox).then(|| {
                view! {
                    <DeleteConfirm
                        button_class="delete-btn"
                        on_confirm=Callback::new(move |_| {
                            let id = delete_id.clone();
                            spawn_local(async move {
                                match commands::delete_list(&id).await {
                                    // The server reassigns its tasks to Inbox.
                                    Ok(()) => ctx.reload(),
                                    Err(e) => ctx.report_failure("deleting list", &e),
                                }
                            });
                        })
                    />
                }
            })}
        </div>
    }
}

#[component]
fn FolderRow(folder: Folder, row_index: usize) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let folder_drag = expect_context::<FolderDrag>().0;
    let list_drag = expect_context::<ListDrag>().0;

    let id = folder.id.clone();
    let title = folder.title.clone();
    let emoji = folder.emoji.clone().unwrap_or_default();

    let arm = make_on_mousedown(folder_drag, id.clone());
    let hover_id = id.clone();
    let hover_list_folder = id.clone();
    let on_hover = move |ev: web_sys::MouseEvent| {
        if let Some(dragging) = folder_drag.dragging_read.get_untracked() {
            if dragging != hover_id {
                folder_drag
                    .drop_spot_write
                    .set(Some(DropSpot {
                        container: (),
                        index: hover_index(&ev, row_index),
                    }));
            }
        }
        // A list dragged onto a folder header targets the end of that
        // folder's list set.
        if list_drag.dragging_read.get_untracked().is_some() {
            list_drag
                .drop_spot_write
                .set(Some(DropSpot {
                    container: Some(hover_list_folder.clone()),
                    index: usize::MAX,
                }));
        }
    };

    let delete_id = id.clone();
    let count_id = id.clone();
    let lists_folder_id = id.clone();

    view! {
        <div class="folder-block">
            <div class="nav-row folder-row" on:mousedown=arm on:mousemove=on_hover>
                <span class="nav-emoji">{emoji}</span>
                <span class="nav-label">{title}</span>
                <span class="nav-count">
                    {move || {
                        store_counts(&store)
                            .per_folder
                            .get(&count_id)
                            .copied()
                            .unwrap_or(0)
                    }}
                </span>
                <DeleteConfirm
                    button_class="delete-btn"
                    on_confirm=Callback::new(move |_| {
                        let id = delete_id.clone();
                        spawn_local(async move {
                            match commands::delete_folder(&id).await {
                                Ok(()) => {
                                    // Lists survive folder deletion.
                                    store_detach_folder(&store, &id);
                                    ctx.reload();
                                }
                                Err(e) => ctx.report_failure("deleting folder", &e),
                            }
                        });
                    })
                />
            </div>
            <div class="folder-lists">
                {move || {
                    let folder_id = lists_folder_id.clone();
                    let mut lists: Vec<List> = store_lists(&store)
                        .into_iter()
                        .filter(|l| l.folder_id.as_deref() == Some(folder_id.as_str()))
                        .collect();
                    lists.sort_by_key(|l| l.position);
                    lists
                        .into_iter()
                        .enumerate()
                        .map(|(i, list)| view! { <ListRow list=list row_index=i /> })
                        .collect_view()
                }}
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let (new_list_title, set_new_list_title) = signal(String::new());
    let (new_folder_title, set_new_folder_title) = signal(String::new());

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = new_list_title.get();
        let Some(title) = crate::models::validate_title(&raw).map(str::to_string) else {
            return;
        };
        spawn_local(async move {
            let args = CreateListArgs {
                title: &title,
                emoji: None,
                folder_id: None,
            };
            match commands::create_list(&args).await {
                Ok(_) => {
                    set_new_list_title.set(String::new());
                    ctx.reload();
                }
                Err(e) => ctx.report_failure("adding list", &e),
            }
        });
    };

    let create_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw = new_folder_title.get();
        let Some(title) = crate::models::validate_title(&raw).map(str::to_string) else {
            return;
        };
        spawn_local(async move {
            let args = CreateFolderArgs {
                title: &title,
                emoji: None,
            };
            match commands::create_folder(&args).await {
                Ok(_) => {
                    set_new_folder_title.set(String::new());
                    ctx.reload();
                }
                Err(e) => ctx.report_failure("adding folder", &e),
            }
        });
    };

    let toggle_sort = move |_| {
        let next = match store_sort_mode(&store) {
            SortMode::Manual => SortMode::DueDate,
            SortMode::DueDate => SortMode::Manual,
        };
        store_set_sort_mode(&store, next);
        settings::save_sort_mode(next);
        ctx.reload();
    };

    view! {
        <nav class="sidebar">
            <div class="smart-views">
                {smart_button("All", SmartView::All, move || store_counts(&store).all)}
                {smart_button("Today", SmartView::Today, move || store_counts(&store).today)}
                {smart_button("Next 7 days", SmartView::Next7Days, move || {
                    store_counts(&store).next7
                })}
                {smart_button("Inbox", SmartView::Inbox, move || store_counts(&store).inbox)}
            </div>

            <button class="sort-toggle" on:click=toggle_sort>
                {move || match store_sort_mode(&store) {
                    SortMode::Manual => "Sort: manual",
                    SortMode::DueDate => "Sort: due date",
                }}
            </button>

            // Folder-less lists first, then folders with their lists.
            <div class="loose-lists">
                {move || {
                    let mut lists: Vec<List> = store_lists(&store)
                        .into_iter()
                        .filter(|l| l.folder_id.is_none())
                        .collect();
                    lists.sort_by_key(|l| l.position);
                    lists
                        .into_iter()
                        .enumerate()
                        .map(|(i, list)| view! { <ListRow list=list row_index=i /> })
                        .collect_view()
                }}
            </div>

            <div class="folders">
                {move || {
                    let mut folders = store.folders().read().clone();
                    folders.sort_by_key(|f| f.position);
                    folders
                        .into_iter()
                        .enumerate()
                        .map(|(i, folder)| view! { <FolderRow folder=folder row_index=i /> })
                        .collect_view()
                }}
            </div>

            <form class="new-entity-form" on:submit=create_list>
                <input
                    type="text"
                    placeholder="New list..."
                    prop:value=move || new_list_title.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_new_list_title.set(input.value());
                    }
                />
                <button type="submit">"Add"</button>
            </form>
            <form class="new-entity-form" on:submit=create_folder>
                <input
                    type="text"
                    placeholder="New folder..."
                    prop:value=move || new_folder_title.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_new_folder_title.set(input.value());
                    }
                />
                <button type="submit">"Add"</button>
            </form>
        </nav>
    }
}
