//! Row Swipe Recognizer
//!
//! A per-row finite state machine over a single pointer stream.
//! Horizontal displacement reveals complete (right) or delete (left)
//! actions; vertical dominance early in the gesture reclassifies it as
//! a scroll and resets the row. Pure transitions, no DOM access, so
//! thresholds are unit-testable.

/// Vertical movement beyond this, while dominating horizontal movement,
/// reclassifies the gesture as a list scroll.
pub const VERTICAL_SLOP_PX: f64 = 12.0;
/// Horizontal displacement required on release to trigger an action.
pub const ACTION_THRESHOLD_PX: f64 = 64.0;
/// Maximum visual offset of a swiped row.
pub const MAX_OPEN_PX: f64 = 96.0;
/// At or above this viewport width the recognizer is inert and
/// drag-to-reorder owns the rows instead.
pub const DESKTOP_BREAKPOINT_PX: f64 = 768.0;

/// Whether the viewport is at or above the desktop breakpoint. Swipe
/// is inert there; drag-to-reorder owns the rows instead.
pub fn viewport_is_desktop() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
        .map(|w| w >= DESKTOP_BREAKPOINT_PX)
        .unwrap_or(true)
}

/// Recognizer states. `Dragging` carries the clamped horizontal offset
/// and the raw vertical displacement seen so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeState {
    Idle,
    Dragging { dx: f64, dy: f64 },
    /// Swiped right past the threshold: complete.
    ResolvedLeft,
    /// Swiped left past the threshold: delete, pending confirmation.
    ResolvedRight,
    Reset,
}

/// Pointer events, with displacements relative to the press point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEvent {
    Press,
    Move { dx: f64, dy: f64 },
    Release,
    Cancel,
}

/// Side effects a transition asks its caller to perform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeEffect {
    /// Toggle the row's task to completed.
    Complete,
    /// Open the delete confirmation for the row's task.
    ConfirmDelete,
    /// Animate the row back to neutral.
    Snap,
}

/// Pure transition function: `(state, event) -> (state, effect)`.
pub fn transition(state: SwipeState, event: SwipeEvent) -> (SwipeState, Option<SwipeEffect>) {
    match (state, event) {
        // Press always (re)arms the row, including over a previously
        // resolved or reset row.
        (_, SwipeEvent::Press) => (SwipeState::Dragging { dx: 0.0, dy: 0.0 }, None),

        (SwipeState::Dragging { .. }, SwipeEvent::Move { dx, dy }) => {
            if dy.abs() > VERTICAL_SLOP_PX && dy.abs() > dx.abs() {
                // Vertical scroll won; give the row back untouched.
                (SwipeState::Reset, Some(SwipeEffect::Snap))
            } else {
                let clamped = dx.clamp(-MAX_OPEN_PX, MAX_OPEN_PX);
                (SwipeState::Dragging { dx: clamped, dy }, None)
            }
        }

        (SwipeState::Dragging { dx, .. }, SwipeEvent::Release) => {
            if dx > ACTION_THRESHOLD_PX {
                (SwipeState::ResolvedLeft, Some(SwipeEffect::Complete))
            } else if dx < -ACTION_THRESHOLD_PX {
                (SwipeState::ResolvedRight, Some(SwipeEffect::ConfirmDelete))
            } else {
                (SwipeState::Reset, Some(SwipeEffect::Snap))
            }
        }

        (SwipeState::Dragging { .. }, SwipeEvent::Cancel) => {
            (SwipeState::Reset, Some(SwipeEffect::Snap))
        }

        // Moves and releases on a non-dragging row are stale events from
        // a pointer we no longer track.
        (state, _) => (state, None),
    }
}

/// Visual horizontal offset for a row in the given state.
pub fn row_offset(state: &SwipeState) -> f64 {
    match state {
        SwipeState::Dragging { dx, .. } => *dx,
        SwipeState::ResolvedLeft => MAX_OPEN_PX,
        SwipeState::ResolvedRight => -MAX_OPEN_PX,
        SwipeState::Idle | SwipeState::Reset => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(dx: f64, dy: f64) -> SwipeState {
        SwipeState::Dragging { dx, dy }
    }

    #[test]
    fn press_arms_the_row() {
        let (state, effect) = transition(SwipeState::Idle, SwipeEvent::Press);
        assert_eq!(state, dragging(0.0, 0.0));
        assert_eq!(effect, None);
    }

    #[test]
    fn vertical_dominance_forces_reset() {
        let (state, effect) = transition(
            dragging(4.0, 0.0),
            SwipeEvent::Move { dx: 6.0, dy: -30.0 },
        );
        assert_eq!(state, SwipeState::Reset);
        assert_eq!(effect, Some(SwipeEffect::Snap));
    }

    #[test]
    fn small_vertical_wobble_keeps_dragging() {
        let (state, _) = transition(
            dragging(0.0, 0.0),
            SwipeEvent::Move { dx: 40.0, dy: 8.0 },
        );
        assert_eq!(state, dragging(40.0, 8.0));
    }

    #[test]
    fn horizontal_offset_is_clamped() {
        let (state, _) = transition(
            dragging(0.0, 0.0),
            SwipeEvent::Move { dx: 300.0, dy: 0.0 },
        );
        assert_eq!(state, dragging(MAX_OPEN_PX, 0.0));
        assert_eq!(row_offset(&state), MAX_OPEN_PX);
    }

    #[test]
    fn release_past_right_threshold_completes() {
        let (state, effect) = transition(dragging(80.0, 2.0), SwipeEvent::Release);
        assert_eq!(state, SwipeState::ResolvedLeft);
        assert_eq!(effect, Some(SwipeEffect::Complete));
    }

    #[test]
    fn release_past_left_threshold_asks_for_delete_confirmation() {
        let (state, effect) = transition(dragging(-80.0, 2.0), SwipeEvent::Release);
        assert_eq!(state, SwipeState::ResolvedRight);
        assert_eq!(effect, Some(SwipeEffect::ConfirmDelete));
    }

    #[test]
    fn release_below_threshold_snaps_back_with_no_action() {
        let (state, effect) = transition(dragging(30.0, 2.0), SwipeEvent::Release);
        assert_eq!(state, SwipeState::Reset);
        assert_eq!(effect, Some(SwipeEffect::Snap));
    }

    #[test]
    fn threshold_is_strict() {
        let (state, effect) = transition(dragging(ACTION_THRESHOLD_PX, 0.0), SwipeEvent::Release);
        assert_eq!(state, SwipeState::Reset);
        assert_eq!(effect, Some(SwipeEffect::Snap));
    }

    #[test]
    fn timid_swipe_never_fires_an_action() {
        // Drag out a little, wobble, come back, release: no effect but Snap.
        let mut state = SwipeState::Idle;
        let script = [
            SwipeEvent::Press,
            SwipeEvent::Move { dx: 20.0, dy: 3.0 },
            SwipeEvent::Move { dx: 45.0, dy: 6.0 },
            SwipeEvent::Move { dx: 12.0, dy: 4.0 },
            SwipeEvent::Release,
        ];
        let mut effects = Vec::new();
        for ev in script {
            let (next, effect) = transition(state, ev);
            state = next;
            effects.extend(effect);
        }
        assert_eq!(state, SwipeState::Reset);
        assert_eq!(effects, vec![SwipeEffect::Snap]);
    }

    #[test]
    fn stale_events_on_idle_rows_are_ignored() {
        let (state, effect) = transition(SwipeState::Idle, SwipeEvent::Move { dx: 50.0, dy: 0.0 });
        assert_eq!(state, SwipeState::Idle);
        assert_eq!(effect, None);
        let (state, effect) = transition(SwipeState::Reset, SwipeEvent::Release);
        assert_eq!(state, SwipeState::Reset);
        assert_eq!(effect, None);
    }

    #[test]
    fn press_rearms_after_resolution() {
        let (state, _) = transition(SwipeState::ResolvedLeft, SwipeEvent::Press);
        assert_eq!(state, dragging(0.0, 0.0));
    }
}
