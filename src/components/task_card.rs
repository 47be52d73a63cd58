//! Task Card Component
//!
//! A single draggable task. The card is also a drop target so that
//! hovering it positions the dragged task relative to it. Focus the card
//! and press Space or Enter to lift it with the keyboard.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::components::DeleteConfirmButton;
use crate::models::TaskItem;
use crate::store::{store_delete_task, use_app_store};

#[component]
pub fn TaskCard(
    item: TaskItem,
    dnd: DndSignals,
    on_start: Callback<DragId>,
    on_over: Callback<(DragId, Option<DragId>)>,
) -> impl IntoView {
    let store = use_app_store();

    let id = item.id.clone();
    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseover = make_on_mouseover(dnd, id.clone(), on_over);
    let on_touchstart = make_on_touchstart(dnd, id.clone());
    let on_keydown = make_on_keydown(dnd, id.clone(), on_start);
    let task_name = item.name.clone();
    let dnd_id = id.clone();

    let card_class = {
        let id = id.clone();
        move || {
            let mut c = String::from("task-card");
            if dnd.active_id_read.get().as_deref() == Some(id.as_str()) { c.push_str(" dragging"); }
            if dnd.over_id_read.get().as_deref() == Some(id.as_str()) { c.push_str(" drop-target"); }
            c
        }
    };

    view! {
        <div
            class=card_class
            tabindex="0"
            role="button"
            aria-roledescription="draggable task"
            data-dnd-id=dnd_id
            on:mousedown=on_mousedown
            on:mouseover=on_mouseover
            on:touchstart=on_touchstart
            on:keydown=on_keydown
        >
            <TaskCardBody item=item />
            <DeleteConfirmButton
                button_class="delete-btn"
                task_name=task_name
                on_confirm=Callback::new(move |_: ()| store_delete_task(&store, &id))
            />
        </div>
    }
}

/// Name, date and note of a task; shared with the drag preview
#[component]
pub fn TaskCardBody(item: TaskItem) -> impl IntoView {
    view! {
        <div class="task-card-body">
            <div class="task-card-header">
                <span class="task-name">{item.name}</span>
                <span class="task-date">{item.date}</span>
            </div>
            <p class="task-note">{item.note}</p>
        </div>
    }
}
