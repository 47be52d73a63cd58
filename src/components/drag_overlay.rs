//! Drag Overlay Component
//!
//! Floating preview of the task being dragged, following the pointer.

use leptos::ev;
use leptos::prelude::*;

use crate::components::TaskCardBody;
use crate::store::{use_app_store, AppStateStoreFields};

/// Offset between the pointer and the preview's top-left corner
const PREVIEW_OFFSET_PX: i32 = 12;

#[component]
pub fn DragOverlay() -> impl IntoView {
    let store = use_app_store();
    let (pointer, set_pointer) = signal((0i32, 0i32));

    // Mounted once for the app's lifetime, like the global DnD listeners
    let _ = window_event_listener(ev::mousemove, move |ev| {
        set_pointer.set((ev.client_x(), ev.client_y()));
    });
    let _ = window_event_listener(ev::touchmove, move |ev| {
        if let Some(touch) = ev.touches().get(0) {
            set_pointer.set((touch.client_x(), touch.client_y()));
        }
    });

    let active_item = move || store.board().with(|state| state.active_item().cloned());

    view! {
        {move || active_item().map(|item| {
            let style = move || {
                let (x, y) = pointer.get();
                format!("left: {}px; top: {}px;", x + PREVIEW_OFFSET_PX, y + PREVIEW_OFFSET_PX)
            };
            view! {
                <div class="drag-overlay task-card" style=style>
                    <TaskCardBody item=item />
                </div>
            }
        })}
    }
}
