//! Storage seam: repository traits plus the Postgres and in-memory backends.
//!
//! The traits are object-safe so the service layer can be handed
//! `Arc<dyn CatalogStore>` / `Arc<dyn CartStore>` from the process's
//! composition root instead of reaching for a global.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Cart, NewProduct, Product};
use crate::error::Result;

/// Well-known key of the singleton cart record. Creation is an atomic upsert
/// on this key, so concurrent first access cannot produce duplicate carts.
pub const CART_KEY: Uuid = Uuid::nil();

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn product(&self, id: Uuid) -> Result<Option<Product>>;
    async fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>>;
    async fn insert_product(&self, new: NewProduct) -> Result<Product>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Return the singleton cart, creating an empty one if none exists.
    async fn get_or_create(&self) -> Result<Cart>;

    /// Persist the given cart state wholesale. Last write wins.
    async fn persist(&self, cart: &Cart) -> Result<Cart>;
}
