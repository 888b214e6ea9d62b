//! Storefront backend: product catalog, singleton shared cart, REST API.
//!
//! The cart is the interesting part: line items merge by product, unit prices
//! are snapshotted at add time, and the cart total is recomputed from the line
//! collection before every persist.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod service;
pub mod state;
pub mod store;

pub use error::{FieldError, Result, StoreError};
