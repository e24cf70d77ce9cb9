use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use tower_cookies::Cookies;
use uuid::Uuid;

use crate::state::AppState;

/// Extracts the session token from the request cookies.
fn extract_session_token(cookies: &Cookies) -> Option<Uuid> {
    cookies
        .get("session_id")
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// A middleware that requires a valid session to be present.
///
/// A request without one (no cookie, unknown id, or expired session) is
/// redirected to the login page. On success the `Session` is attached to
/// the request extensions for handlers to pick up.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Result<Response, Redirect> {
    tracing::debug!("🔐 Checking authentication...");

    let session_id = extract_session_token(&cookies).ok_or_else(|| {
        tracing::debug!("No session_id cookie found, redirecting to login");
        Redirect::to("/login")
    })?;

    let session = state.sessions.get(&session_id).await.ok_or_else(|| {
        tracing::debug!("Unknown or expired session: {}", session_id);
        Redirect::to("/login")
    })?;

    tracing::debug!("✅ User authenticated: {}", session.user_id);

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
