//! In-memory `UserStore` for tests. Enforces email uniqueness the same way the
//! `users_email_key` constraint does.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::repo::{StoreError, UserStore};
use crate::auth::repo_types::User;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub async fn count_by_email(&self, email: &str) -> usize {
        let users = self.users.read().await;
        users.values().filter(|u| u.email == email).count()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateKey);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }
}

/// Store whose lookups never see existing rows, as if every registration
/// lost the race between the pre-check and the insert.
pub struct BlindLookupStore(pub MemoryUserStore);

#[async_trait]
impl UserStore for BlindLookupStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.0.find_by_id(id).await
    }

    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        self.0.insert(user).await
    }
}
