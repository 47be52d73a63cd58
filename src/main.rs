//! Eisenhower Board Frontend Entry Point

mod app;
mod board;
mod commands;
mod components;
mod config;
mod context;
mod models;
mod reconciler;
mod store;
mod sync;

use std::rc::Rc;

use app::App;
use commands::{page_origin, HttpIdentity, HttpTaskApi};
use config::AppConfig;
use leptos::prelude::*;
use sync::{IdentityProvider, TaskApi};

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(e) = rolling_logger::init(config.log_level, config.log_capacity) {
        web_sys::console::warn_1(&format!("logger already installed: {}", e).into());
    }
    log::info!("[APP] starting, task store at {}", config.api_base);

    let origin = page_origin();
    let identity: Rc<dyn IdentityProvider> = Rc::new(HttpIdentity::new(&config, &origin));
    let api: Rc<dyn TaskApi> = Rc::new(HttpTaskApi::new(&config, &origin));

    mount_to_body(move || view! { <App config=config identity=identity api=api /> });
}
