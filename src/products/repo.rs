use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::products::repo_types::Product;

/// Read access to the catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Newest first.
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Product>>;

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Product>>;
}

#[derive(Clone)]
pub struct PgProductStore {
    db: PgPool,
}

impl PgProductStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock, category, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, stock, category, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}
