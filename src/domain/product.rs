//! Product catalog records.
//!
//! Products are created by the seed binary or `POST /products` and are never
//! mutated or deleted by the cart core. Carts reference them by id and keep
//! their own unit-price snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub stock: i32,
    pub rating: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product. Boundary validation (non-empty
/// fields, non-negative price and stock) happens before this is constructed.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub stock: i32,
    pub rating: Decimal,
}

impl Product {
    pub fn create(new: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            stock: new.stock,
            rating: new.rating,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_id_and_timestamps() {
        let p = Product::create(NewProduct {
            name: "Widget".into(),
            description: "A widget".into(),
            price: Decimal::new(1999, 2),
            image: "https://example.com/widget.png".into(),
            category: "tools".into(),
            stock: 10,
            rating: Decimal::ZERO,
        });
        assert_eq!(p.name, "Widget");
        assert_eq!(p.price, Decimal::new(1999, 2));
        assert_eq!(p.created_at, p.updated_at);
    }
}
