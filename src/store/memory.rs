//! In-memory stores, used by the test suite and for running without Postgres.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Cart, NewProduct, Product};
use crate::error::Result;
use crate::store::{CartStore, CatalogStore, CART_KEY};

#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    cart: RwLock<Option<Cart>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(products.clone())
    }

    async fn product(&self, id: Uuid) -> Result<Option<Product>> {
        let products = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        let products = self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_product(&self, new: NewProduct) -> Result<Product> {
        let product = Product::create(new);
        let mut products = self
            .products
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        products.push(product.clone());
        Ok(product)
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn get_or_create(&self) -> Result<Cart> {
        let mut slot = self.cart.write().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.get_or_insert_with(|| Cart::empty(CART_KEY)).clone())
    }

    async fn persist(&self, cart: &Cart) -> Result<Cart> {
        let mut slot = self.cart.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(cart.clone());
        Ok(cart.clone())
    }
}
