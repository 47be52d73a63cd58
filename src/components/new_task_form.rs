//! New Task Form Component
//!
//! Name + note inputs; new tasks always start in the unassigned lane.

use leptos::prelude::*;

use crate::store::{store_create_task, use_app_store};

/// Form for creating new tasks
#[component]
pub fn NewTaskForm() -> impl IntoView {
    let store = use_app_store();

    let (new_name, set_new_name) = signal(String::new());
    let (new_note, set_new_note) = signal(String::new());

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get();
        let note = new_note.get();
        // Both fields are required; the board ignores incomplete tasks
        if store_create_task(&store, &name, &note).is_some() {
            set_new_name.set(String::new());
            set_new_note.set(String::new());
        }
    };

    view! {
        <div class="new-task-panel">
            <h3 class="new-task-title">"Create new Task"</h3>
            <form class="new-task-form" on:submit=create_task>
                <input
                    type="text"
                    placeholder="Enter a name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Enter a note"
                    prop:value=move || new_note.get()
                    on:input=move |ev| set_new_note.set(event_target_value(&ev))
                />
                <button type="submit" title="Add task">"+"</button>
            </form>
        </div>
    }
}
