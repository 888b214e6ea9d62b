//! Cart aggregate: the singleton collection of line items and derived total.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// One product-quantity-price tuple within the cart.
///
/// `unit_price` is a snapshot of the product price taken when the line was
/// created or last merged into. It is deliberately not live-linked: a catalog
/// price change does not affect an existing line until it is merged again.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartLineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub items: Vec<CartLineItem>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sum of `unit_price × quantity` over the given lines.
///
/// An empty collection sums to exactly zero. Every mutating operation calls
/// this (via [`Cart::normalize`]) as its last step before persistence, so the
/// stored total is never observably stale.
pub fn total_of(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + item.line_total())
}

impl Cart {
    pub fn empty(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            items: vec![],
            total: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn line(&self, item_id: Uuid) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Quantity already in the cart for the given product, across all lines.
    pub fn quantity_of(&self, product_id: Uuid) -> u32 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }

    /// Merge a product into the cart. An existing line for the product has its
    /// quantity incremented and its unit-price snapshot refreshed to the
    /// product's current price; otherwise a new line is appended.
    pub fn merge_line(&mut self, product: &Product, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity += quantity;
            existing.unit_price = product.price;
        } else {
            self.items.push(CartLineItem {
                id: Uuid::new_v4(),
                product_id: product.id,
                quantity,
                unit_price: product.price,
            });
        }
    }

    /// Set the quantity of the line with the given id, leaving its unit-price
    /// snapshot untouched. Returns false if no such line exists.
    pub fn set_quantity(&mut self, item_id: Uuid, quantity: u32) -> bool {
        match self.items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line with the given id. Returns false if no such line
    /// exists, so a second remove with the same id reports not-found.
    pub fn remove_line(&mut self, item_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }

    /// Drop any line whose quantity fell below 1 and recompute the total.
    /// Invariant after this call: `total == Σ unit_price × quantity`.
    pub fn normalize(&mut self) {
        self.items.retain(|i| i.quantity >= 1);
        self.total = total_of(&self.items);
        self.updated_at = Utc::now();
    }
}

/// Line item with its product reference resolved to full product data, for
/// responses.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedLineItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product: Option<Product>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedCart {
    pub id: Uuid,
    pub items: Vec<HydratedLineItem>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
