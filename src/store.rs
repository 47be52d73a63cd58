//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board is
//! kept as one [`BoardState`] value and replaced by the pure reconciler on
//! every drag event.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{TaskId, TaskRecord};
use crate::reconciler::{apply_if_changed, BoardState, DragEvent};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Five lanes plus the task being dragged
    pub board: BoardState,
    /// Gates the board until hydration finishes or fails
    pub loading: bool,
    /// A save is in flight (save button disabled)
    pub saving: bool,
    /// Transient "Saved" acknowledgment
    pub save_ack: bool,
    /// User-visible failures, oldest first; shown one at a time
    pub notices: Vec<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            board: BoardState::default(),
            loading: true,
            saving: false,
            save_ack: false,
            notices: Vec::new(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Run one drag lifecycle event through the reconciler.
///
/// Lanes are only notified when the event actually changes the board.
pub fn store_apply_drag(store: &AppStore, event: DragEvent) {
    log::trace!("[DND] {:?}", event);
    let board = store.board();
    if let Some(next) = board.with_untracked(|current| apply_if_changed(current, &event)) {
        *board.write() = next;
    }
}

/// Create a task in the unassigned lane
pub fn store_create_task(store: &AppStore, name: &str, note: &str) -> Option<TaskId> {
    store
        .board()
        .try_update(|state| state.board.create_task(name, note))
        .flatten()
}

/// Remove a task by ID, wherever it lives
pub fn store_delete_task(store: &AppStore, task_id: &str) {
    let removed = store.board().try_update(|state| state.board.delete_task(task_id));
    if removed.flatten().is_none() {
        log::debug!("[BOARD] delete ignored, {} is not on the board", task_id);
    }
}

/// Append hydrated records to the board
pub fn store_hydrate(store: &AppStore, records: Vec<TaskRecord>) {
    let added = store
        .board()
        .try_update(|state| state.board.hydrate(records))
        .unwrap_or_default();
    log::info!("[BOARD] hydrated {} tasks", added);
}

/// Queue a blocking notice for the user
pub fn store_push_notice(store: &AppStore, message: impl Into<String>) {
    let message = message.into();
    store.notices().update(|notices| notices.push(message));
}

/// Dismiss the notice currently shown
pub fn store_dismiss_notice(store: &AppStore) {
    store.notices().update(|notices| {
        if !notices.is_empty() {
            notices.remove(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{board_with, lane_ids};
    use crate::board::Board;
    use crate::models::ContainerKey::*;

    fn store_with(board: Board) -> AppStore {
        let mut state = AppState::new();
        state.board = BoardState::new(board);
        Store::new(state)
    }

    fn board_of(store: &AppStore) -> BoardState {
        store.board().get_untracked()
    }

    #[test]
    fn test_notices_dismissed_oldest_first() {
        let store = store_with(Board::new());
        store_push_notice(&store, "first");
        store_push_notice(&store, String::from("second"));
        store_dismiss_notice(&store);
        assert_eq!(store.notices().get_untracked(), ["second"]);
        store_dismiss_notice(&store);
        store_dismiss_notice(&store);
        assert!(store.notices().get_untracked().is_empty());
    }

    #[test]
    fn test_drag_through_store() {
        let store = store_with(board_with(&[(Unassigned, &["a", "b"])]));
        store_apply_drag(&store, DragEvent::Start { active: "a".to_string() });
        assert!(board_of(&store).is_dragging());

        // Same-lane hover changes nothing
        let before = board_of(&store);
        store_apply_drag(&store, DragEvent::Over { active: "a".to_string(), over: Some("b".to_string()) });
        assert_eq!(board_of(&store), before);

        store_apply_drag(
            &store,
            DragEvent::End { active: Some("a".to_string()), over: Some("container5".to_string()) },
        );
        let state = board_of(&store);
        assert_eq!(lane_ids(&state.board, NotImportantUrgent), ["a"]);
        assert_eq!(lane_ids(&state.board, Unassigned), ["b"]);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_create_delete_hydrate_through_store() {
        let store = store_with(Board::new());
        assert_eq!(store_create_task(&store, "", "note"), None);
        let id = store_create_task(&store, "Call bank", "before noon").unwrap();
        assert_eq!(lane_ids(&board_of(&store).board, Unassigned), [id.clone()]);

        store_hydrate(
            &store,
            vec![TaskRecord {
                id: "r1".to_string(),
                name: "Remote".to_string(),
                date: "2024-01-01".to_string(),
                note: String::new(),
                container: "container3".to_string(),
            }],
        );
        assert_eq!(lane_ids(&board_of(&store).board, ImportantUrgent), ["r1"]);

        store_delete_task(&store, &id);
        store_delete_task(&store, "ghost");
        assert_eq!(board_of(&store).board.len(), 1);
    }
}
