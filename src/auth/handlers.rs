use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest},
        error::AuthError,
        extractors::AuthUser,
    },
    email::welcome_message,
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 8;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AuthError> {
    let name = payload.name.trim().to_string();
    let email = normalize_email(&payload.email);

    if name.is_empty() {
        warn!("empty name");
        return Err(AuthError::validation("name must not be empty"));
    }
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AuthError::validation("invalid email"));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AuthError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = state.auth.register(name, email, payload.password).await?;

    let (subject, body) = welcome_message(&user.name);
    if let Err(e) = state.mailer.send(&user.email, &subject, &body).await {
        error!(error = %e, user_id = %user.id, "welcome email failed");
    }

    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(AuthError::validation("invalid email"));
    }

    let res = state.auth.login(email, payload.password).await?;
    Ok(Json(res))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let user = state.auth.store().find_by_id(user_id).await?.ok_or_else(|| {
        warn!(%user_id, "token for missing user");
        AuthError::Unauthorized
    })?;
    Ok(Json(PublicUser::from(&user)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::memory::MemoryUserStore;
    use crate::email::testing::RecordingMailer;

    fn app(mailer: Arc<RecordingMailer>) -> Router {
        let state = AppState::fake(Arc::new(MemoryUserStore::default()), mailer);
        Router::new()
            .merge(auth_routes())
            .merge(me_routes())
            .with_state(state)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("router responds");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn test_user() -> Value {
        json!({ "name": "Test User", "email": "test@example.com", "password": "password123" })
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(!is_valid_email("test@example"));
        assert!(!is_valid_email("no at sign.com"));
        assert_eq!(normalize_email("  Test@Example.COM "), "test@example.com");
    }

    #[tokio::test]
    async fn register_then_login_then_me() {
        let mailer = Arc::new(RecordingMailer::default());
        let app = app(mailer.clone());

        let (status, body) = send(&app, post_json("/auth/register", test_user())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "test@example.com");
        assert_eq!(body["role"], "user");
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "email": "test@example.com", "password": "password123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["accessToken"].as_str().expect("accessToken");
        assert!(!token.is_empty());

        let req = Request::get("/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Test User");
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let app = app(Arc::new(RecordingMailer::default()));
        let (first, _) = send(&app, post_json("/auth/register", test_user())).await;
        assert_eq!(first, StatusCode::CREATED);

        let (second, body) = send(&app, post_json("/auth/register", test_user())).await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let app = app(Arc::new(RecordingMailer::default()));
        send(&app, post_json("/auth/register", test_user())).await;

        let wrong = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "email": "test@example.com", "password": "wrongpassword" }),
            ),
        )
        .await;
        let unknown = send(
            &app,
            post_json(
                "/auth/login",
                json!({ "email": "ghost@example.com", "password": "password123" }),
            ),
        )
        .await;

        assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong, unknown);
    }

    #[tokio::test]
    async fn register_validates_input() {
        let app = app(Arc::new(RecordingMailer::default()));
        let cases = [
            json!({ "name": "  ", "email": "a@example.com", "password": "password123" }),
            json!({ "name": "A", "email": "not-an-email", "password": "password123" }),
            json!({ "name": "A", "email": "a@example.com", "password": "short" }),
        ];
        for case in cases {
            let (status, body) = send(&app, post_json("/auth/register", case)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn mail_failure_does_not_fail_registration() {
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..Default::default()
        });
        let app = app(mailer);
        let (status, _) = send(&app, post_json("/auth/register", test_user())).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn me_requires_bearer_token() {
        let app = app(Arc::new(RecordingMailer::default()));
        let req = Request::get("/me").body(Body::empty()).unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let req = Request::get("/me")
            .header(header::AUTHORIZATION, "Bearer garbage")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
