//! Application Context
//!
//! Shared UI state provided via Leptos Context API: the reload
//! trigger, the current scope, the search box, and composer defaults.

use leptos::prelude::*;

use crate::commands::ApiError;
use crate::scope::Scope;

/// Default container for tasks created from the composer.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposerTarget {
    pub list_id: String,
    pub section_id: Option<String>,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload the current scope and counts - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// Current scope - read
    pub scope: ReadSignal<Scope>,
    set_scope: WriteSignal<Scope>,
    /// Free-text search within the scope
    pub search: ReadSignal<String>,
    pub set_search: WriteSignal<String>,
    /// Where the composer files new tasks
    pub composer_target: ReadSignal<Option<ComposerTarget>>,
    set_composer_target: WriteSignal<Option<ComposerTarget>>,
    /// Last failed operation, shown until dismissed or replaced
    pub last_error: ReadSignal<Option<String>>,
    set_last_error: WriteSignal<Option<String>>,
}

/// One-line user-facing message for a failed operation.
pub fn failure_message(action: &str, err: &ApiError) -> String {
    format!("{action} failed: {err}")
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        scope: (ReadSignal<Scope>, WriteSignal<Scope>),
        search: (ReadSignal<String>, WriteSignal<String>),
        composer_target: (
            ReadSignal<Option<ComposerTarget>>,
            WriteSignal<Option<ComposerTarget>>,
        ),
        last_error: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            scope: scope.0,
            set_scope: scope.1,
            search: search.0,
            set_search: search.1,
            composer_target: composer_target.0,
            set_composer_target: composer_target.1,
            last_error: last_error.0,
            set_last_error: last_error.1,
        }
    }

    /// Trigger a reload of the current scope and the aggregate counts
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Switch scope; the scope effect reloads and swaps collapse sets
    pub fn select_scope(&self, scope: Scope) {
        self.set_scope.set(scope);
    }

    /// Point the composer at a container
    pub fn set_composer_target(&self, target: Option<ComposerTarget>) {
        self.set_composer_target.set(target);
    }

    /// Surface a failed operation to the user (and the console); the
    /// store keeps whatever it last held.
    pub fn report_failure(&self, action: &str, err: &ApiError) {
        let message = failure_message(action, err);
        web_sys::console::error_1(&message.as_str().into());
        self.set_last_error.set(Some(message));
    }

    pub fn clear_error(&self) {
        self.set_last_error.set(None);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_names_action_and_cause() {
        let msg = failure_message("deleting list", &ApiError::Server { status: 500 });
        assert_eq!(msg, "deleting list failed: server error (status 500)");

        let msg = failure_message("loading tasks", &ApiError::Transport("offline".into()));
        assert_eq!(msg, "loading tasks failed: network error: offline");
    }
}
