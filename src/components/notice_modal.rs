//! Notice Modal Component
//!
//! Blocking notice for sync failures, dismissed one at a time.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields};

#[component]
pub fn NoticeModal() -> impl IntoView {
    let store = use_app_store();

    let current = move || store.notices().with(|notices| notices.first().cloned());
    let remaining = move || store.notices().with(|notices| notices.len().saturating_sub(1));

    view! {
        {move || current().map(|message| view! {
            <div class="modal-backdrop">
                <div class="modal" role="alertdialog">
                    <p class="modal-message">{message}</p>
                    <Show when=move || { remaining() > 0 }>
                        <p class="modal-more">{move || format!("{} more", remaining())}</p>
                    </Show>
                    <button
                        type="button"
                        class="modal-ok"
                        on:click=move |_| store_dismiss_notice(&store)
                    >
                        "OK"
                    </button>
                </div>
            </div>
        })}
    }
}
