//! Board Lane Component
//!
//! One quadrant (or the unassigned pool). The lane surface is a drop
//! target named by its container key, which is how an empty lane
//! receives tasks.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::TaskCard;
use crate::models::{ContainerKey, TaskItem};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardLane(
    container: ContainerKey,
    dnd: DndSignals,
    on_start: Callback<DragId>,
    on_over: Callback<(DragId, Option<DragId>)>,
) -> impl IntoView {
    let store = use_app_store();
    let on_mouseover = make_on_mouseover(dnd, container.as_str().to_string(), on_over);

    let tasks = move || store.board().with(|state| state.board.lane(container).to_vec());
    let count = move || store.board().with(|state| state.board.lane(container).len());

    let lane_class = move || {
        let mut c = format!("board-lane {}", container.as_str());
        if dnd.over_id_read.get().as_deref() == Some(container.as_str()) { c.push_str(" drop-target"); }
        c
    };

    view! {
        <section class=lane_class data-dnd-id=container.as_str() on:mouseover=on_mouseover>
            <header class="board-lane-header">
                <h2>{container.label()}</h2>
                <span class="board-lane-count">{count}</span>
            </header>
            <div class="board-lane-tasks">
                <For
                    each=tasks
                    key=|item: &TaskItem| item.id.clone()
                    children=move |item: TaskItem| view! {
                        <TaskCard item=item dnd=dnd on_start=on_start on_over=on_over />
                    }
                />
            </div>
        </section>
    }
}
