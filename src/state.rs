//! Application state threaded through the router.
//!
//! Store handles are constructed once in the binary and passed in here; no
//! module holds global mutable state.

use std::sync::Arc;

use crate::service::CartService;
use crate::store::{CartStore, CatalogStore};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub cart: Arc<CartService>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, carts: Arc<dyn CartStore>) -> Self {
        let cart = Arc::new(CartService::new(catalog.clone(), carts));
        Self { catalog, cart }
    }
}
