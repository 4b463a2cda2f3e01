//! NoteForest server routes

use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{SESSION_COOKIE, session_middleware, session_token},
    models::{
        DeleteNoteResponse, ListNotesResponse, NoteResponse, PasswordRequest, StatusResponse,
        WriteNoteRequest, WriteNoteResponse,
    },
    state::AppState,
    validation::validate_password,
};

/// Create the router for the NoteForest server
pub fn create_router(state: AppState) -> Router {
    let note_routes = Router::new()
        .route("/list", get(list_notes))
        .route("/read/:uuid", get(read_note))
        .route("/write", post(write_note))
        .route("/:uuid", delete(delete_note))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    let auth_routes = Router::new()
        .route("/status", get(auth_status))
        .route("/setup", post(auth_setup))
        .route("/login", post(auth_login))
        .route("/logout", post(auth_logout))
        .route("/check", get(auth_check));

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .nest("/api", note_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "noteforest"
    }))
}

/// Report whether the shared password has been configured
pub async fn auth_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(StatusResponse {
        password_set: state.credentials.is_configured(),
    })
}

/// One-time password setup endpoint
///
/// The only path that ever creates the credential; once it exists, setup is
/// rejected regardless of input.
pub async fn auth_setup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<PasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Password setup attempt");

    if state.credentials.is_configured() {
        return Err(ApiError::AlreadyConfigured);
    }
    validate_password(&payload.password).map_err(ApiError::Validation)?;

    state.credentials.setup(&payload.password).await.map_err(|e| {
        error!("Failed to persist credential: {}", e);
        ApiError::InternalServerError
    })?;

    let token = state.sessions.create().await.map_err(|e| {
        error!("Failed to create session: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Password configured, session issued");
    Ok((jar.add(session_cookie(token)), Json(json!({"success": true}))))
}

/// Login endpoint
pub async fn auth_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<PasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt");

    if !state.credentials.is_configured() {
        return Err(ApiError::NotConfigured);
    }
    if payload.password.is_empty() {
        warn!("Login failed: empty password");
        return Err(ApiError::Validation("Password is required".to_string()));
    }

    let ok = state.credentials.verify(&payload.password).await.map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::InternalServerError
    })?;
    if !ok {
        warn!("Login failed: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.sessions.create().await.map_err(|e| {
        error!("Failed to create session: {}", e);
        ApiError::InternalServerError
    })?;

    info!("Login successful, session issued");
    Ok((jar.add(session_cookie(token)), Json(json!({"success": true}))))
}

/// Logout endpoint; always succeeds, even without a known session
pub async fn auth_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = session_token(&jar) {
        state.sessions.remove(token).await.map_err(|e| {
            error!("Failed to persist session table: {}", e);
            ApiError::InternalServerError
        })?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    Ok((jar, Json(json!({"success": true}))))
}

/// Report whether the request carries a valid session
pub async fn auth_check(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let token = session_token(&jar).ok_or(ApiError::Unauthorized)?;

    if !state.sessions.validate(token).await {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(json!({"authenticated": true})))
}

/// List summaries of all notes, newest first
pub async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summaries = state.notes.list().await.map_err(|e| {
        error!("Failed to list notes: {}", e);
        ApiError::InternalServerError
    })?;

    let count = summaries.len();
    Ok(Json(ListNotesResponse {
        success: true,
        data: summaries,
        count,
    }))
}

/// Read a full note by id
pub async fn read_note(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.notes.read(&uuid).await?;

    Ok(Json(NoteResponse {
        success: true,
        data: note,
    }))
}

/// Create or fully replace a note
pub async fn write_note(
    State(state): State<AppState>,
    Json(payload): Json<WriteNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .notes
        .write(
            &payload.uuid,
            &payload.title,
            payload.tags,
            &payload.body,
            payload.created_at,
        )
        .await?;

    info!("Note {} written", payload.uuid);
    Ok(Json(WriteNoteResponse {
        success: true,
        uuid: payload.uuid,
    }))
}

/// Delete a note by id
pub async fn delete_note(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.delete(&uuid).await?;

    info!("Note {} deleted", uuid);
    Ok(Json(DeleteNoteResponse {
        success: true,
        deleted_uuid: uuid,
    }))
}

fn session_cookie(token: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use crate::sessions::SessionStore;
    use crate::store::NoteStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const NOTE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn test_state(dir: &TempDir) -> AppState {
        let notes_dir = dir.path().join("notes");
        let auth_dir = dir.path().join("auth");
        tokio::fs::create_dir_all(&notes_dir).await.unwrap();
        tokio::fs::create_dir_all(&auth_dir).await.unwrap();

        AppState {
            credentials: CredentialStore::new(auth_dir.join("password.hash")),
            sessions: SessionStore::load(auth_dir.join("sessions.json"), 60).await,
            notes: NoteStore::new(notes_dir),
        }
    }

    fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    /// Pull the `name=value` pair out of a Set-Cookie response header
    fn cookie_pair(response: &axum::response::Response) -> String {
        let raw = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("set-cookie header")
            .to_str()
            .expect("cookie value");
        raw.split(';').next().expect("cookie pair").to_string()
    }

    #[tokio::test]
    async fn full_session_and_note_lifecycle() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir).await;
        let app = create_router(state);

        // No credential yet.
        let response = app
            .clone()
            .oneshot(request("GET", "/auth/status", None, None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["passwordSet"], Value::Bool(false));

        // A weak password is rejected before anything is persisted.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/setup",
                None,
                Some(json!({"password": "short"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // First-time setup configures the credential and issues a session.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/setup",
                None,
                Some(json!({"password": "longenough1"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let setup_cookie = cookie_pair(&response);
        assert!(setup_cookie.starts_with(SESSION_COOKIE));
        assert_eq!(body_json(response).await["success"], Value::Bool(true));

        // Setup is now permanently disabled.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/setup",
                None,
                Some(json!({"password": "anotherlongone"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Wrong password issues no session.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/login",
                None,
                Some(json!({"password": "wrong"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        // Correct password issues a fresh session cookie.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/auth/login",
                None,
                Some(json!({"password": "longenough1"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = cookie_pair(&response);

        // The note API rejects requests without a session.
        let response = app
            .clone()
            .oneshot(request("GET", "/api/list", None, None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Write, read back, list, delete.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/write",
                Some(&cookie),
                Some(json!({"uuid": NOTE_ID, "title": "T", "tags": ["a"], "body": "hi"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["uuid"], Value::String(NOTE_ID.to_string()));

        let response = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/api/read/{}", NOTE_ID),
                Some(&cookie),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["title"], Value::String("T".to_string()));
        assert_eq!(body["data"]["tags"], json!(["a"]));
        assert_eq!(body["data"]["body"], Value::String("hi".to_string()));

        let response = app
            .clone()
            .oneshot(request("GET", "/api/list", Some(&cookie), None))
            .await
            .expect("response");
        let body = body_json(response).await;
        assert_eq!(body["count"], json!(1));
        assert_eq!(body["data"][0]["uuid"], Value::String(NOTE_ID.to_string()));

        let response = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/{}", NOTE_ID),
                Some(&cookie),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["deletedUuid"],
            Value::String(NOTE_ID.to_string())
        );

        let response = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/api/read/{}", NOTE_ID),
                Some(&cookie),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Logout invalidates the session.
        let response = app
            .clone()
            .oneshot(request("POST", "/auth/logout", Some(&cookie), None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request("GET", "/auth/check", Some(&cookie), None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_before_setup_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir).await;
        let app = create_router(state);

        let response = app
            .oneshot(request(
                "POST",
                "/auth/login",
                None,
                Some(json!({"password": "whatever1"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn auth_check_without_cookie_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir).await;
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", "/auth/check", None, None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn note_routes_validate_ids_and_fields() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir).await;
        let cookie = format!(
            "{}={}",
            SESSION_COOKIE,
            state.sessions.create().await.unwrap()
        );
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(request("GET", "/api/read/not-a-uuid", Some(&cookie), None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/write",
                Some(&cookie),
                Some(json!({"uuid": NOTE_ID, "title": "", "body": "hi"})),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/{}", NOTE_ID),
                Some(&cookie),
                None,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn expired_session_is_rejected_by_the_gate() {
        let dir = TempDir::new().unwrap();
        let notes_dir = dir.path().join("notes");
        let auth_dir = dir.path().join("auth");
        tokio::fs::create_dir_all(&notes_dir).await.unwrap();
        tokio::fs::create_dir_all(&auth_dir).await.unwrap();

        let state = AppState {
            credentials: CredentialStore::new(auth_dir.join("password.hash")),
            sessions: SessionStore::load(auth_dir.join("sessions.json"), 0).await,
            notes: NoteStore::new(notes_dir),
        };
        let cookie = format!(
            "{}={}",
            SESSION_COOKIE,
            state.sessions.create().await.unwrap()
        );
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", "/api/list", Some(&cookie), None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
