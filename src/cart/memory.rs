//! In-memory `CartStore` for tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::cart::repo::CartStore;
use crate::cart::repo_types::{CartItemRow, CartRow};

#[derive(Default)]
pub struct MemoryCartStore {
    pub carts: Vec<(CartRow, Vec<CartItemRow>)>,
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<CartRow>> {
        Ok(self
            .carts
            .iter()
            .find(|(c, _)| c.user_id == user_id)
            .map(|(c, _)| c.clone()))
    }

    async fn items(&self, cart_id: Uuid) -> anyhow::Result<Vec<CartItemRow>> {
        let mut rows = self
            .carts
            .iter()
            .find(|(c, _)| c.id == cart_id)
            .map(|(_, items)| items.clone())
            .unwrap_or_default();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}
