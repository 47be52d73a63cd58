//! Save Button Component
//!
//! Flushes the whole board to the task store and shows a transient
//! "Saved" acknowledgment afterwards. Disabled until the board is loaded.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{store_push_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn SaveButton() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let save = move |_| {
        // Both are also rejected by the gateway; this keeps the UI quiet
        if store.loading().get_untracked() || store.saving().get_untracked() || ctx.gateway().is_saving() {
            return;
        }
        let user_id = match ctx.session.with_untracked(|s| s.user_id().map(str::to_string)) {
            Ok(id) => id,
            Err(e) => {
                store_push_notice(&store, e.to_string());
                return;
            }
        };
        let board = store.board().with_untracked(|state| state.board.clone());
        let gateway = ctx.gateway();
        let ack_ms = u32::try_from(ctx.save_ack.as_millis()).unwrap_or(u32::MAX);

        *store.saving().write() = true;
        spawn_local(async move {
            let result = gateway.save(&user_id, &board).await;
            *store.saving().write() = false;
            match result {
                Ok(report) => {
                    for failure in report.failures {
                        store_push_notice(&store, failure.to_string());
                    }
                    *store.save_ack().write() = true;
                    TimeoutFuture::new(ack_ms).await;
                    *store.save_ack().write() = false;
                }
                Err(e) => store_push_notice(&store, e.to_string()),
            }
        });
    };

    view! {
        <div class="save-bar">
            <button
                type="button"
                class="save-btn"
                disabled=move || store.loading().get() || store.saving().get()
                on:click=save
            >
                {move || if store.save_ack().get() {
                    "Saved ✓"
                } else if store.saving().get() {
                    "Saving..."
                } else {
                    "Save Tasks"
                }}
            </button>
        </div>
    }
}
