use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct CartRow {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// One line of a cart joined with its product.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemRow {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i32,
}
