//! Delete Confirm Button Component
//!
//! Inline two-step delete for a task card.

use leptos::prelude::*;

/// Inline delete confirmation for one task.
///
/// Shows a × button; clicking it asks "Delete <name>?" with ✓/✗. Clicks
/// never reach the card, so pressing the buttons cannot start a drag.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    /// Name of the task, used in labels and the prompt
    #[prop(into)] task_name: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let delete_label = format!("Delete task \"{}\"", task_name);
    let prompt = format!("Delete \"{}\"?", task_name);
    let confirm_label = format!("Confirm deleting \"{}\"", task_name);
    let cancel_label = format!("Keep \"{}\"", task_name);

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class=button_class.clone()
                    title=delete_label.clone()
                    aria-label=delete_label.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm" role="group" aria-label=prompt.clone()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    aria-label=confirm_label.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    aria-label=cancel_label.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
