//! Cart service: the aggregation core behind the /cart endpoints.
//!
//! Every mutation follows the same shape: resolve referenced records, validate
//! stock, mutate the line collection, recompute the total, persist, then
//! return the cart hydrated with product data. Failures before persist leave
//! the stored cart untouched.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Cart, HydratedCart, HydratedLineItem, Product};
use crate::error::{Result, StoreError};
use crate::store::{CartStore, CatalogStore};

pub struct CartService {
    catalog: Arc<dyn CatalogStore>,
    carts: Arc<dyn CartStore>,
    // Serializes cart mutations within the process so no two
    // read-validate-write sequences interleave (single writer per cart).
    // Cross-process writers remain last-write-wins.
    write_lock: Mutex<()>,
}

impl CartService {
    pub fn new(catalog: Arc<dyn CatalogStore>, carts: Arc<dyn CartStore>) -> Self {
        Self {
            catalog,
            carts,
            write_lock: Mutex::new(()),
        }
    }

    /// Return the singleton cart, lazily creating it on first access.
    pub async fn get_cart(&self) -> Result<HydratedCart> {
        let cart = self.carts.get_or_create().await?;
        self.hydrate(cart).await
    }

    /// Add `quantity` of a product to the cart. Stock is validated against the
    /// resulting quantity for the product across the cart, so repeated adds
    /// cannot overshoot stock any more than a single one can.
    pub async fn add_to_cart(&self, product_id: Uuid, quantity: u32) -> Result<HydratedCart> {
        let _guard = self.write_lock.lock().await;

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product not found"))?;

        let mut cart = self.carts.get_or_create().await?;
        let resulting = i64::from(cart.quantity_of(product_id)) + i64::from(quantity);
        if i64::from(product.stock) < resulting {
            return Err(StoreError::conflict("Insufficient stock"));
        }

        cart.merge_line(&product, quantity);
        cart.normalize();
        let cart = self.carts.persist(&cart).await?;
        tracing::debug!(%product_id, quantity, total = %cart.total, "added item to cart");
        self.hydrate(cart).await
    }

    /// Set a line item's quantity to an absolute value. The unit-price
    /// snapshot is left unchanged.
    pub async fn update_cart_item(&self, item_id: Uuid, quantity: u32) -> Result<HydratedCart> {
        let _guard = self.write_lock.lock().await;

        let mut cart = self.carts.get_or_create().await?;
        let product_id = cart
            .line(item_id)
            .map(|line| line.product_id)
            .ok_or_else(|| StoreError::not_found("Item not found in cart"))?;

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or_else(|| StoreError::not_found("Product not found"))?;
        if i64::from(product.stock) < i64::from(quantity) {
            return Err(StoreError::conflict("Insufficient stock"));
        }

        cart.set_quantity(item_id, quantity);
        cart.normalize();
        let cart = self.carts.persist(&cart).await?;
        tracing::debug!(%item_id, quantity, total = %cart.total, "updated cart item");
        self.hydrate(cart).await
    }

    /// Delete a line item. A second remove with the same id reports not-found.
    pub async fn remove_from_cart(&self, item_id: Uuid) -> Result<HydratedCart> {
        let _guard = self.write_lock.lock().await;

        let mut cart = self.carts.get_or_create().await?;
        if !cart.remove_line(item_id) {
            return Err(StoreError::not_found("Item not found in cart"));
        }

        cart.normalize();
        let cart = self.carts.persist(&cart).await?;
        tracing::debug!(%item_id, total = %cart.total, "removed item from cart");
        self.hydrate(cart).await
    }

    /// Attach full product data to each line item's product reference.
    async fn hydrate(&self, cart: Cart) -> Result<HydratedCart> {
        let mut ids: Vec<Uuid> = cart.items.iter().map(|i| i.product_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let by_id: HashMap<Uuid, Product> = self
            .catalog
            .products_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(HydratedCart {
            id: cart.id,
            items: cart
                .items
                .into_iter()
                .map(|item| HydratedLineItem {
                    id: item.id,
                    product_id: item.product_id,
                    product: by_id.get(&item.product_id).cloned(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            total: cart.total,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        })
    }
}
