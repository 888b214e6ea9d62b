//! Postgres-backed catalog and cart stores.
//!
//! Cart line items are stored as a JSONB document on the singleton cart row,
//! mirroring the document shape the API serves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Cart, CartLineItem, NewProduct, Product};
use crate::error::Result;
use crate::store::{CartStore, CatalogStore, CART_KEY};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    id: Uuid,
    items: Json<Vec<CartLineItem>>,
    total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            items: row.items.0,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    async fn product(&self, id: Uuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn insert_product(&self, new: NewProduct) -> Result<Product> {
        let product = Product::create(new);
        sqlx::query(
            "INSERT INTO products (id, name, description, price, image, category, stock, rating, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(&product.category)
        .bind(product.stock)
        .bind(product.rating)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(product)
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn get_or_create(&self) -> Result<Cart> {
        // Atomic get-or-create on the fixed key; a concurrent creator just
        // loses the upsert and reads the winner's row.
        sqlx::query(
            "INSERT INTO carts (id, items, total, created_at, updated_at) \
             VALUES ($1, $2, 0, NOW(), NOW()) ON CONFLICT (id) DO NOTHING",
        )
        .bind(CART_KEY)
        .bind(Json(Vec::<CartLineItem>::new()))
        .execute(&self.pool)
        .await?;

        let row = sqlx::query_as::<_, CartRow>(
            "SELECT id, items, total, created_at, updated_at FROM carts WHERE id = $1",
        )
        .bind(CART_KEY)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn persist(&self, cart: &Cart) -> Result<Cart> {
        let row = sqlx::query_as::<_, CartRow>(
            "UPDATE carts SET items = $2, total = $3, updated_at = NOW() WHERE id = $1 \
             RETURNING id, items, total, created_at, updated_at",
        )
        .bind(cart.id)
        .bind(Json(&cart.items))
        .bind(cart.total)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}
