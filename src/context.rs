//! Application Context
//!
//! Shared handles provided via Leptos Context API. The gateway is not
//! `Send`, so it lives in local storage behind a `Copy` handle.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;

use crate::sync::{Session, SyncGateway};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Session resolved by the identity provider - read
    pub session: ReadSignal<Session>,
    /// Sync gateway shared by load and save
    gateway: StoredValue<Rc<SyncGateway>, LocalStorage>,
    /// How long the "Saved" acknowledgment stays visible
    pub save_ack: Duration,
}

impl AppContext {
    pub fn new(session: ReadSignal<Session>, gateway: SyncGateway, save_ack: Duration) -> Self {
        Self {
            session,
            gateway: StoredValue::new_local(Rc::new(gateway)),
            save_ack,
        }
    }

    pub fn gateway(&self) -> Rc<SyncGateway> {
        self.gateway.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
