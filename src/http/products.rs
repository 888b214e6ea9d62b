//! /products endpoint handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{NewProduct, Product};
use crate::error::{Result, StoreError};
use crate::http::response::ApiResponse;
use crate::http::{validate, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Product description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Product image URL is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "Product category is required"))]
    pub category: String,
    #[validate(range(min = 0, message = "Stock must be a non-negative integer"))]
    pub stock: i64,
    pub rating: Option<f64>,
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog.list_products().await?;
    Ok(Json(ApiResponse::ok(products)))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let id =
        Uuid::parse_str(&id).map_err(|_| StoreError::not_found("Product not found"))?;
    let product = state
        .catalog
        .product(id)
        .await?
        .ok_or_else(|| StoreError::not_found("Product not found"))?;
    Ok(Json(ApiResponse::ok(product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>)> {
    validate(&request)?;
    let rating = match request.rating {
        Some(raw) => decimal_field(raw, "rating", "Rating must be a number")?,
        None => Decimal::ZERO,
    };
    let new = NewProduct {
        name: request.name,
        description: request.description,
        price: decimal_field(request.price, "price", "Price must be a positive number")?,
        image: request.image,
        category: request.category,
        stock: i32::try_from(request.stock)
            .map_err(|_| StoreError::invalid("stock", "Stock must be a non-negative integer"))?,
        rating,
    };

    let product = state.catalog.insert_product(new).await?;
    tracing::info!(product_id = %product.id, name = %product.name, "created product");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(product))))
}

fn decimal_field(raw: f64, field: &str, message: &str) -> Result<Decimal> {
    Decimal::try_from(raw).map_err(|_| StoreError::invalid(field, message))
}
