//! Session Endpoint
//!
//! Reads the auth provider's session (`{api_base}/auth/session`), which is
//! `{ "user": { "id": ... } }` when signed in and `{}` otherwise.

use async_trait::async_trait;
use serde::Deserialize;

use super::transport_error;
use crate::config::AppConfig;
use crate::sync::{IdentityProvider, Session, SyncResult};

#[derive(Deserialize, Default)]
struct SessionBody {
    user: Option<SessionUser>,
}

#[derive(Deserialize)]
struct SessionUser {
    id: Option<String>,
}

pub struct HttpIdentity {
    client: reqwest::Client,
    session_url: String,
}

impl HttpIdentity {
    pub fn new(config: &AppConfig, origin: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            session_url: config.endpoint(origin, "auth/session"),
        }
    }

    async fn fetch(&self) -> SyncResult<String> {
        let response = self
            .client
            .get(&self.session_url)
            .send()
            .await
            .map_err(transport_error)?;
        response.text().await.map_err(transport_error)
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HttpIdentity {
    async fn session(&self) -> Session {
        match self.fetch().await {
            Ok(body) => session_from_body(&body),
            Err(e) => {
                log::warn!("[AUTH] session lookup failed: {}", e);
                Session::unauthenticated()
            }
        }
    }
}

/// Authenticated only when the body names a non-empty user id
fn session_from_body(body: &str) -> Session {
    let parsed: SessionBody = serde_json::from_str(body).unwrap_or_default();
    match parsed.user.and_then(|u| u.id).filter(|id| !id.is_empty()) {
        Some(id) => Session::authenticated(id),
        None => Session::unauthenticated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::AuthStatus;

    #[test]
    fn test_signed_in_session() {
        let session = session_from_body(
            r#"{"user":{"id":"6650aa","name":"Ada","email":"ada@example.com"},"expires":"2030-01-01"}"#,
        );
        assert_eq!(session.status, AuthStatus::Authenticated);
        assert_eq!(session.user_id(), Ok("6650aa"));
    }

    #[test]
    fn test_signed_out_session() {
        for body in ["{}", r#"{"user":{"name":"no id"}}"#, "", "null"] {
            assert_eq!(session_from_body(body), Session::unauthenticated(), "body {:?}", body);
        }
    }
}
