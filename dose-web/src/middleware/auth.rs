//! Authentication middleware

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::session::SessionData;
use crate::AppState;

/// Logged-in user extracted from the session
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

/// Middleware: Require an authenticated session, otherwise redirect to login
pub async fn require_login(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let session = SessionData::from_jar(&jar, &state.config.secret_key);

    match session.user {
        Some(username) => {
            req.extensions_mut().insert(CurrentUser { username });
            next.run(req).await
        }
        None => {
            tracing::debug!("Anonymous request to {}, redirecting to login", req.uri().path());
            Redirect::to("/login").into_response()
        }
    }
}

// Implement FromRequestParts for CurrentUser
#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| Redirect::to("/login"))
    }
}
