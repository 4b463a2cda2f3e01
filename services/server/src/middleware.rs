//! Session middleware guarding the note API

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Name of the httpOnly cookie carrying the session token
pub const SESSION_COOKIE: &str = "noteforest_session";

/// Reject requests that do not carry a valid, unexpired session
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(&jar).ok_or(ApiError::Unauthorized)?;

    if !state.sessions.validate(token).await {
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// Extract the session token from the request's cookie jar
pub fn session_token(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
