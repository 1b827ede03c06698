use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::auth::{
    claims::TokenPayload,
    dto::{LoginResponse, PublicUser},
    error::AuthError,
    jwt::TokenIssuer,
    password::{hash_password_blocking, verify_dummy, verify_password_blocking},
    repo::UserStore,
    repo_types::User,
};

/// Registration and login rules. Input syntax is checked by the handlers;
/// this layer owns uniqueness, hashing, verification and token issuance.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<PublicUser, AuthError> {
        if self.store.find_by_email(&email).await?.is_some() {
            warn!(%email, "email already registered");
            return Err(AuthError::Conflict);
        }

        let hash = hash_password_blocking(password).await?;
        let user = User::new(name, email, hash);

        // A concurrent registration may have won since the lookup; the store
        // reports that as DuplicateKey, which converts to Conflict.
        let saved = self.store.insert(&user).await.map_err(|e| {
            let err = AuthError::from(e);
            if matches!(err, AuthError::Conflict) {
                warn!(email = %user.email, "email taken by concurrent registration");
            }
            err
        })?;

        info!(user_id = %saved.id, email = %saved.email, "user registered");
        Ok(PublicUser::from(&saved))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse, AuthError> {
        let Some(user) = self.store.find_by_email(&email).await? else {
            verify_dummy(password).await;
            warn!(%email, "login unknown email");
            return Err(AuthError::Unauthorized);
        };

        if !verify_password_blocking(password, user.password_hash.clone()).await? {
            warn!(%email, user_id = %user.id, "login invalid password");
            return Err(AuthError::Unauthorized);
        }

        let access_token = self.issuer.issue(TokenPayload {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
        })?;

        debug!(user_id = %user.id, "user logged in");
        Ok(LoginResponse { access_token })
    }
}
