//! Eisenhower Board App
//!
//! Main application component: save bar, new-task form and the board.
//! Identity and task store handles are injected by `main`.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{BoardView, NewTaskForm, NoticeModal, SaveButton};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{store_hydrate, store_push_notice, AppState, AppStateStoreFields, AppStore};
use crate::sync::{should_load, AuthStatus, IdentityProvider, Session, SyncGateway, TaskApi};

#[component]
pub fn App(
    config: AppConfig,
    identity: Rc<dyn IdentityProvider>,
    api: Rc<dyn TaskApi>,
) -> impl IntoView {
    // State
    let store: AppStore = Store::new(AppState::new());
    let (session, set_session) = signal(Session::default());
    let ctx = AppContext::new(session, SyncGateway::new(api), config.save_ack);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Resolve the session once on mount
    spawn_local(async move {
        let resolved = identity.session().await;
        log::info!("[AUTH] session status {:?}", resolved.status);
        set_session.set(resolved);
    });

    // Hydrate on the transition into Authenticated, never on re-renders
    Effect::new(move |previous: Option<AuthStatus>| {
        let current = session.with(|s| s.status);
        if should_load(previous, current) {
            load_board(store, ctx, session.get_untracked());
        } else if current == AuthStatus::Unauthenticated {
            *store.loading().write() = false;
        }
        current
    });

    let signed_out = move || session.with(|s| s.status == AuthStatus::Unauthenticated);

    view! {
        <main class="app-layout">
            <SaveButton />
            <Show when=signed_out>
                <p class="signed-out-hint">"Sign in to load and save your tasks."</p>
            </Show>
            <NewTaskForm />
            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <div class="loading">"Loading tasks..."</div> }
            >
                <BoardView />
            </Show>
            <NoticeModal />
        </main>
    }
}

/// Fetch the user's tasks and append them to the board
fn load_board(store: AppStore, ctx: AppContext, session: Session) {
    let gateway = ctx.gateway();
    spawn_local(async move {
        match gateway.load(&session).await {
            Ok(records) => store_hydrate(&store, records),
            Err(e) => {
                log::error!("[SYNC] load failed: {}", e);
                store_push_notice(&store, e.to_string());
            }
        }
        *store.loading().write() = false;
    });
}
