//! /cart endpoint handlers.
//!
//! Boundary validation happens here (input shape, id parsing); everything
//! after that is the cart service's job. Validation order for adds: input
//! shape, then product existence, then stock.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::HydratedCart;
use crate::error::{Result, StoreError};
use crate::http::response::ApiResponse;
use crate::http::{validate, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i64,
}

pub async fn get_cart(State(state): State<AppState>) -> Result<Json<ApiResponse<HydratedCart>>> {
    let cart = state.cart.get_cart().await?;
    Ok(Json(ApiResponse::ok(cart)))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AddToCartRequest>,
) -> Result<Json<ApiResponse<HydratedCart>>> {
    validate(&request)?;
    let product_id = Uuid::parse_str(&request.product_id)
        .map_err(|_| StoreError::invalid("productId", "Invalid product ID"))?;
    let quantity = positive_quantity(request.quantity)?;

    let cart = state.cart.add_to_cart(product_id, quantity).await?;
    Ok(Json(ApiResponse::ok_with_message("Item added to cart", cart)))
}

pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateCartItemRequest>,
) -> Result<Json<ApiResponse<HydratedCart>>> {
    validate(&request)?;
    let quantity = positive_quantity(request.quantity)?;
    let item_id = parse_item_id(&id)?;

    let cart = state.cart.update_cart_item(item_id, quantity).await?;
    Ok(Json(ApiResponse::ok_with_message("Cart item updated", cart)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HydratedCart>>> {
    let item_id = parse_item_id(&id)?;
    let cart = state.cart.remove_from_cart(item_id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Item removed from cart",
        cart,
    )))
}

fn positive_quantity(raw: i64) -> Result<u32> {
    // Already validated >= 1; this only guards the integer width.
    u32::try_from(raw)
        .map_err(|_| StoreError::invalid("quantity", "Quantity must be a positive integer"))
}

// An unparseable path id cannot reference any line item, so it maps to the
// route's not-found case rather than a validation failure.
fn parse_item_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| StoreError::not_found("Item not found in cart"))
}
