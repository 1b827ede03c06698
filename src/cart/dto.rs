use anyhow::Context;
use serde::Serialize;
use uuid::Uuid;

use crate::cart::repo_types::{CartItemRow, CartRow};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i32,
}

/// `id` is null until the user's first item creates the cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
    pub total_cents: i64,
}

impl CartView {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            total_cents: 0,
        }
    }

    /// Fails when a line or the total does not fit in `i64` cents.
    pub fn from_rows(cart: CartRow, rows: Vec<CartItemRow>) -> anyhow::Result<Self> {
        let total_cents = rows.iter().try_fold(0i64, |acc, r| {
            r.unit_price_cents
                .checked_mul(i64::from(r.quantity))
                .and_then(|line| acc.checked_add(line))
                .with_context(|| format!("cart {} total overflows", cart.id))
        })?;
        let items = rows
            .into_iter()
            .map(|r| CartItem {
                product_id: r.product_id,
                name: r.name,
                unit_price_cents: r.unit_price_cents,
                quantity: r.quantity,
            })
            .collect();
        Ok(Self {
            id: Some(cart.id),
            user_id: cart.user_id,
            items,
            total_cents,
        })
    }
}
