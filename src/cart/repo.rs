use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cart::repo_types::{CartItemRow, CartRow};

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<CartRow>>;

    /// Lines of a cart joined with their products, by product name.
    async fn items(&self, cart_id: Uuid) -> anyhow::Result<Vec<CartItemRow>>;
}

#[derive(Clone)]
pub struct PgCartStore {
    db: PgPool,
}

impl PgCartStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<CartRow>> {
        let row = sqlx::query_as::<_, CartRow>(
            r#"
            SELECT id, user_id
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn items(&self, cart_id: Uuid) -> anyhow::Result<Vec<CartItemRow>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT ci.product_id, p.name, p.price_cents AS unit_price_cents, ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY p.name ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
