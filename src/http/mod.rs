//! HTTP façade: router wiring, request validation helpers, handlers.

pub mod cart;
pub mod products;
pub mod response;

use axum::extract::FromRequest;
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use validator::{Validate, ValidationErrors};

use crate::error::{FieldError, Result, StoreError};
use crate::state::AppState;

/// `Json` extractor whose rejection goes through the standard error envelope:
/// a body that fails to parse or deserialize (wrong type, missing field,
/// non-integer quantity) is a 400 validation failure, not a bare 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(StoreError))]
pub struct JsonBody<T>(pub T);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route(
            "/cart/:id",
            put(cart::update_cart_item).delete(cart::remove_from_cart),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/:id", get(products::get_product))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy", "service": "storefront"}))
}

/// Run derive-based validation, collecting every violated field into one
/// `Validation` error rather than stopping at the first.
pub(crate) fn validate(request: &impl Validate) -> Result<()> {
    request.validate().map_err(collect_field_errors)
}

fn collect_field_errors(errors: ValidationErrors) -> StoreError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, violations)| {
            let field = camel_case(field);
            violations.iter().map(move |v| FieldError {
                field: field.clone(),
                message: v
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    StoreError::Validation(fields)
}

// Struct fields are snake_case; the wire format reports camelCase names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::camel_case;

    #[test]
    fn camel_cases_field_names() {
        assert_eq!(camel_case("product_id"), "productId");
        assert_eq!(camel_case("quantity"), "quantity");
    }
}
