//! Domain model: catalog products and the cart aggregate.

pub mod cart;
pub mod product;

pub use cart::{total_of, Cart, CartLineItem, HydratedCart, HydratedLineItem};
pub use product::{NewProduct, Product};
