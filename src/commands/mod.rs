//! Task Store Bindings
//!
//! Frontend bindings to the REST task store and the session endpoint,
//! organized by endpoint.

mod session;
mod task;

use crate::sync::SyncError;

pub use session::HttpIdentity;
pub use task::HttpTaskApi;

/// Origin of the current page, used to absolutize relative endpoints
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .unwrap_or_default()
}

fn transport_error(e: reqwest::Error) -> SyncError {
    SyncError::Http(e.to_string())
}
