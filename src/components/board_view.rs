//! Board View Component
//!
//! The unassigned pool beside the 2x2 matrix. Wires leptos-dragdrop's
//! mouse, touch and keyboard lifecycle callbacks into the drag reconciler.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::{BoardLane, DragOverlay};
use crate::models::ContainerKey;
use crate::reconciler::{keyboard_target, DragEvent};
use crate::store::{store_apply_drag, use_app_store, AppStateStoreFields};

/// Quadrants in grid order: top row important, left column not urgent
const MATRIX: [ContainerKey; 4] = [
    ContainerKey::ImportantNotUrgent,
    ContainerKey::ImportantUrgent,
    ContainerKey::NotImportantNotUrgent,
    ContainerKey::NotImportantUrgent,
];

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_store();

    // Create DnD signals
    let dnd = create_dnd_signals();

    let on_over = Callback::new(move |(active, over): (DragId, Option<DragId>)| {
        store_apply_drag(&store, DragEvent::Over { active, over });
    });

    let on_start = Callback::new(move |active: DragId| {
        store_apply_drag(&store, DragEvent::Start { active });
    });
    let handlers = DragHandlers {
        on_start,
        on_over,
        on_end: Callback::new(move |(active, over): (Option<DragId>, Option<DragId>)| {
            log::debug!("[DND] drop {:?} on {:?}", active, over);
            store_apply_drag(&store, DragEvent::End { active, over });
        }),
    };
    let navigate: KeyNavigator = Callback::new(move |(active, over, dir): (DragId, Option<DragId>, KeyMove)| {
        store
            .board()
            .with_untracked(|state| keyboard_target(&state.board, &active, over.as_deref(), dir))
    });

    // Bind global handlers for start and drop
    bind_global_mouseup(dnd, handlers);
    bind_global_touch(dnd, handlers);
    bind_global_keydown(dnd, handlers, navigate);

    let on_mouseleave = make_on_mouseleave(dnd);
    let board_class = move || {
        if store.board().with(|state| state.is_dragging()) { "board dragging" } else { "board" }
    };
    let board_empty = move || store.board().with(|state| state.board.is_empty());

    view! {
        <Show when=board_empty>
            <p class="board-empty-hint">"No tasks yet. Create one above, then drag it into a quadrant."</p>
        </Show>
        <div class=board_class on:mouseleave=on_mouseleave>
            <div class="board-pool">
                <BoardLane container=ContainerKey::Unassigned dnd=dnd on_start=on_start on_over=on_over />
            </div>
            <div class="board-matrix">
                {MATRIX.into_iter().map(|key| view! {
                    <BoardLane container=key dnd=dnd on_start=on_start on_over=on_over />
                }).collect_view()}
            </div>
            <DragOverlay />
        </div>
    }
}
