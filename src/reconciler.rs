//! Drag Reconciler
//!
//! Pure transitions of [`BoardState`] driven by drag lifecycle events.
//! Unresolvable ids are expected while the pointer crosses empty space and
//! never produce errors; they leave the board untouched.

use leptos_dragdrop::KeyMove;

use crate::board::Board;
use crate::models::{ContainerKey, TaskId, TaskItem};

/// Board plus the task currently being dragged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub board: Board,
    pub active: Option<TaskId>,
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        Self { board, active: None }
    }

    /// Task shown in the drag preview
    pub fn active_item(&self) -> Option<&TaskItem> {
        self.active.as_deref().and_then(|id| self.board.get(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

/// Drag lifecycle event. Ids are task ids or container literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { active: String },
    Over { active: String, over: Option<String> },
    End { active: Option<String>, over: Option<String> },
}

/// Compute the next board state for a drag event
pub fn reconcile(state: BoardState, event: &DragEvent) -> BoardState {
    match event {
        DragEvent::Start { active } => drag_start(state, active),
        DragEvent::Over { active, over } => drag_over(state, active, over.as_deref()),
        DragEvent::End { active, over } => drag_end(state, active.as_deref(), over.as_deref()),
    }
}

/// Like [`reconcile`], but `None` when the event leaves the state as it was
pub fn apply_if_changed(state: &BoardState, event: &DragEvent) -> Option<BoardState> {
    let next = reconcile(state.clone(), event);
    (next != *state).then_some(next)
}

/// Next drop target when a drag is steered from the keyboard.
///
/// Up/Down step through the tasks of the lane under the current target,
/// Left/Right jump to the surface of the neighbouring lane in board order.
/// `None` at the edges.
pub fn keyboard_target(board: &Board, active: &str, over: Option<&str>, dir: KeyMove) -> Option<String> {
    let anchor = over.unwrap_or(active);
    let lane = board.locate(anchor)?;
    match dir {
        KeyMove::Left | KeyMove::Right => {
            let next = match dir {
                KeyMove::Left => lane.index().checked_sub(1)?,
                _ => lane.index() + 1,
            };
            ContainerKey::ALL.get(next).map(|key| key.as_str().to_string())
        }
        KeyMove::Up | KeyMove::Down => {
            let tasks = board.lane(lane);
            let at = board
                .position(lane, anchor)
                .or_else(|| board.position(lane, active))
                .unwrap_or(tasks.len());
            let next = match dir {
                KeyMove::Up => at.checked_sub(1)?,
                _ => at + 1,
            };
            tasks.get(next).map(|item| item.id.clone())
        }
    }
}

fn drag_start(mut state: BoardState, active: &str) -> BoardState {
    state.active = state
        .board
        .locate(active)
        .and_then(|key| state.board.position(key, active).map(|_| active.to_string()));
    state
}

/// Live reflow: move the dragged task into the hovered lane as soon as the
/// pointer crosses a lane boundary.
fn drag_over(mut state: BoardState, active: &str, over: Option<&str>) -> BoardState {
    let Some(over) = over else {
        return state;
    };
    let board = &mut state.board;
    let (Some(from), Some(to)) = (board.locate(active), board.locate(over)) else {
        return state;
    };
    if from == to {
        return state;
    }

    let index = insertion_index(board, to, over);
    if let Some(item) = board.take(from, active) {
        board.insert(to, index, item);
    }
    state
}

/// Where a task entering lane `to` lands while hovering `over`.
///
/// Hovering the lane surface appends. Hovering a task inserts before it,
/// except for the last task, where the insert goes after it.
fn insertion_index(board: &Board, to: ContainerKey, over: &str) -> usize {
    let lane = board.lane(to);
    if ContainerKey::parse(over).is_some() {
        return lane.len();
    }
    match board.position(to, over) {
        Some(index) if index + 1 == lane.len() => index + 1,
        Some(index) => index,
        None => lane.len(),
    }
}

fn drag_end(mut state: BoardState, active: Option<&str>, over: Option<&str>) -> BoardState {
    if let (Some(active), Some(over)) = (active, over) {
        drop_task(&mut state.board, active, over);
    }
    state.active = None;
    state
}

fn drop_task(board: &mut Board, active: &str, over: &str) {
    let from = board.locate(active);
    let to = board.locate(over);

    match (from, to) {
        (Some(from), Some(to)) if from == to => {
            let Some(active_index) = board.position(from, active) else {
                return;
            };
            // Dropping on the lane surface moves to the end
            let over_index = board
                .position(to, over)
                .unwrap_or_else(|| board.lane(to).len().saturating_sub(1));
            if active_index != over_index {
                board.move_within(from, active_index, over_index);
            }
        }
        (Some(from), Some(to)) => {
            if let Some(item) = board.take(from, active) {
                board.push(to, item);
            }
        }
        // Nothing resolvable to move or nowhere to put it
        _ => {}
    }
}
