//! Delete Confirmation
//!
//! Two-stage inline delete: the first click only reveals confirm and
//! cancel, so a stray tap never destroys anything.

use leptos::prelude::*;

#[component]
pub fn DeleteConfirm(
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    /// Open the confirmation immediately (e.g. after a swipe resolved
    /// to delete) instead of waiting for a first click.
    #[prop(optional)] armed: Option<RwSignal<bool>>,
) -> impl IntoView {
    let confirming = armed.unwrap_or_else(|| RwSignal::new(false));

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || {
                view! {
                    <button
                        class=button_class.clone()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            confirming.set(true);
                        }
                    >
                        "×"
                    </button>
                }
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        confirming.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        </Show>
    }
}
