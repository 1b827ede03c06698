use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::repo::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already in use")]
    Conflict,

    /// Same message for unknown email and wrong password.
    #[error("invalid credentials")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey => AuthError::Conflict,
            other => AuthError::Store(other),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl AuthError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AuthError::Validation(msg.into())
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::Conflict => "CONFLICT",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Store(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            AuthError::Store(e) => {
                error!(error = %e, "store failure");
                "an internal error occurred".into()
            }
            AuthError::Internal(e) => {
                error!(error = %e, "internal failure");
                "an internal error occurred".into()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.user_message(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}
