//! In-memory `ProductStore` for tests. Remembers the last page it was asked for.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::products::repo::ProductStore;
use crate::products::repo_types::Product;

#[derive(Default)]
pub struct MemoryProductStore {
    pub products: Vec<Product>,
    pub last_page: Mutex<Option<(i64, i64)>>,
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Product>> {
        *self.last_page.lock().expect("page lock") = Some((limit, offset));
        let mut all = self.products.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}
