use std::collections::HashSet;

use axum::extract::State;
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::controller::AppState;

pub const SESSION_COOKIE: &str = "fortifund_session";

/// Admin session tokens, issued on login and held for the process lifetime
/// or until logout.
#[derive(Default)]
pub struct SessionStore {
    tokens: RwLock<HashSet<String>>,
}

impl SessionStore {
    pub async fn issue(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.write().await.insert(token.clone());
        token
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token)
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        cookie
            .trim()
            .strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')
            .map(str::to_string)
    })
}

/// Guard composed onto every administrative route at registration time.
pub async fn require_admin<B>(
    State(app_state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    match session_token(request.headers()) {
        Some(token) if app_state.sessions.is_valid(&token).await => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            "Please log in to access this page.",
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn issued_tokens_validate_until_revoked() {
        let sessions = SessionStore::default();
        let token = sessions.issue().await;

        assert!(sessions.is_valid(&token).await);
        assert!(sessions.revoke(&token).await);
        assert!(!sessions.is_valid(&token).await);
        assert!(!sessions.revoke(&token).await);
    }

    #[test]
    fn session_token_is_read_from_the_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; fortifund_session=abc-123; lang=en"),
        );

        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));

        let empty = HeaderMap::new();
        assert_eq!(session_token(&empty), None);
    }
}
