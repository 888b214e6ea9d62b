//! HTTP-level tests for the REST surface, run against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use storefront::domain::{NewProduct, Product};
use storefront::http;
use storefront::state::AppState;
use storefront::store::memory::MemoryStore;
use storefront::store::CatalogStore;

fn widget(price: Decimal, stock: i32) -> NewProduct {
    NewProduct {
        name: "Widget".into(),
        description: "A widget".into(),
        price,
        image: "https://example.com/widget.png".into(),
        category: "tools".into(),
        stock,
        rating: Decimal::ZERO,
    }
}

async fn app_with_products(products: Vec<NewProduct>) -> (Router, Vec<Product>) {
    let store = Arc::new(MemoryStore::new());
    let mut created = vec![];
    for p in products {
        created.push(store.insert_product(p).await.unwrap());
    }
    (http::router(AppState::new(store.clone(), store)), created)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn total(body: &Value) -> Decimal {
    body["data"]["total"]
        .as_str()
        .expect("total is a decimal string")
        .parse()
        .unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn fresh_cart_is_empty() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(&app, "GET", "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(total(&body), Decimal::ZERO);
}

#[tokio::test]
async fn add_to_cart_returns_hydrated_cart() {
    let (app, products) = app_with_products(vec![widget(Decimal::new(1000, 2), 5)]).await;
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": products[0].id, "quantity": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Item added to cart");
    assert_eq!(total(&body), Decimal::new(2000, 2));

    let item = &body["data"]["items"][0];
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["unitPrice"], "10.00");
    assert_eq!(item["product"]["name"], "Widget");
}

#[tokio::test]
async fn add_reports_all_validation_errors_at_once() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": "", "quantity": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "productId");
    assert_eq!(errors[0]["message"], "Product ID is required");
    assert_eq!(errors[1]["field"], "quantity");
    assert_eq!(errors[1]["message"], "Quantity must be a positive integer");
}

#[tokio::test]
async fn body_shape_failures_get_the_validation_envelope() {
    let (app, products) = app_with_products(vec![widget(Decimal::new(1000, 2), 5)]).await;

    // A fractional quantity fails i64 deserialization before field validation.
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": products[0].id, "quantity": 2.5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");
    assert!(!body["errors"].as_array().unwrap().is_empty());

    // Missing productId field.
    let (status, body) = request(&app, "POST", "/cart", Some(json!({"quantity": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation error");

    // Wrong-typed quantity on update.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/cart/{}", Uuid::new_v4()),
        Some(json!({"quantity": "two"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn add_rejects_malformed_product_id() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": "not-a-uuid", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["message"], "Invalid product ID");
}

#[tokio::test]
async fn add_unknown_product_is_not_found() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": Uuid::new_v4(), "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn add_beyond_stock_is_rejected() {
    let (app, products) = app_with_products(vec![widget(Decimal::new(1000, 2), 5)]).await;
    let (status, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": products[0].id, "quantity": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient stock");

    let (_, body) = request(&app, "GET", "/cart", None).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn update_and_remove_flow() {
    let (app, products) = app_with_products(vec![widget(Decimal::new(1000, 2), 5)]).await;
    let (_, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": products[0].id, "quantity": 2})),
    )
    .await;
    let item_id = body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/cart/{item_id}"),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart item updated");
    assert_eq!(total(&body), Decimal::new(5000, 2));

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/cart/{item_id}"),
        Some(json!({"quantity": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient stock");

    let (_, body) = request(&app, "GET", "/cart", None).await;
    assert_eq!(total(&body), Decimal::new(5000, 2));

    let (status, body) = request(&app, "DELETE", &format!("/cart/{item_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item removed from cart");
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(total(&body), Decimal::ZERO);

    let (status, body) = request(&app, "DELETE", &format!("/cart/{item_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found in cart");
}

#[tokio::test]
async fn update_unknown_item_is_not_found() {
    let (app, _) = app_with_products(vec![]).await;
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/cart/{}", Uuid::new_v4()),
        Some(json!({"quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found in cart");
}

#[tokio::test]
async fn list_and_get_products() {
    let (app, products) = app_with_products(vec![
        widget(Decimal::new(1000, 2), 5),
        widget(Decimal::new(250, 2), 3),
    ])
    .await;

    let (status, body) = request(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = request(&app, "GET", &format!("/products/{}", products[0].id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Widget");
    assert_eq!(body["data"]["price"], "10.00");

    let (status, body) = request(&app, "GET", &format!("/products/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, _) = request(&app, "GET", "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_product_validates_and_persists() {
    let (app, _) = app_with_products(vec![]).await;

    let (status, body) = request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Desk Lamp",
            "description": "LED desk lamp",
            "price": 49.99,
            "image": "https://example.com/lamp.png",
            "category": "furniture",
            "stock": 80
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Desk Lamp");
    assert_eq!(body["data"]["stock"], 80);

    let (status, body) = request(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "",
            "description": "",
            "price": 1.0,
            "image": "",
            "category": "",
            "stock": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

// The end-to-end sequence from the storefront's acceptance checklist, driven
// entirely through the REST surface.
#[tokio::test]
async fn end_to_end_cart_flow_over_http() {
    let (app, products) = app_with_products(vec![widget(Decimal::new(1000, 2), 5)]).await;
    let product_id = products[0].id;

    let (_, body) = request(
        &app,
        "POST",
        "/cart",
        Some(json!({"productId": product_id, "quantity": 2})),
    )
    .await;
    assert_eq!(total(&body), Decimal::new(2000, 2));
    let item_id = body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let (_, body) = request(
        &app,
        "PUT",
        &format!("/cart/{item_id}"),
        Some(json!({"quantity": 5})),
    )
    .await;
    assert_eq!(total(&body), Decimal::new(5000, 2));

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/cart/{item_id}"),
        Some(json!({"quantity": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = request(&app, "DELETE", &format!("/cart/{item_id}"), None).await;
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(total(&body), Decimal::ZERO);
}
