//! Service layer.

pub mod cart;

pub use cart::CartService;
