use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::UserRole;

/// What the service asks to have signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // user ID
    pub email: String,
    pub role: UserRole,
    pub iat: usize,     // issued at (unix timestamp)
    pub exp: usize,     // expires at (unix timestamp)
    pub iss: String,    // issuer
    pub aud: String,    // audience
}
