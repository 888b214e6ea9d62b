//! Catalog seed: clears the products table and loads the sample product set.
//!
//! This is the administrative write path for the catalog; the cart core never
//! creates or mutates products.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::config::Config;
use storefront::domain::NewProduct;
use storefront::store::postgres::PgStore;
use storefront::store::CatalogStore;

fn product(
    name: &str,
    description: &str,
    price: Decimal,
    image: &str,
    category: &str,
    stock: i32,
    rating: Decimal,
) -> NewProduct {
    NewProduct {
        name: name.into(),
        description: description.into(),
        price,
        image: image.into(),
        category: category.into(),
        stock,
        rating,
    }
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        product(
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation and long battery life.",
            Decimal::new(12999, 2),
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
            "electronics",
            50,
            Decimal::new(45, 1),
        ),
        product(
            "Smart Watch",
            "Feature-rich smartwatch with fitness tracking, heart rate monitor, and smartphone notifications.",
            Decimal::new(24999, 2),
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
            "electronics",
            30,
            Decimal::new(47, 1),
        ),
        product(
            "Laptop Backpack",
            "Durable laptop backpack with multiple compartments, USB charging port, and water-resistant material.",
            Decimal::new(5999, 2),
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500",
            "accessories",
            100,
            Decimal::new(43, 1),
        ),
        product(
            "Wireless Mouse",
            "Ergonomic wireless mouse with precision tracking, long battery life, and comfortable design.",
            Decimal::new(2999, 2),
            "https://images.unsplash.com/photo-1527814050087-3793815479db?w=500",
            "electronics",
            75,
            Decimal::new(44, 1),
        ),
        product(
            "Mechanical Keyboard",
            "RGB mechanical keyboard with customizable keys, blue switches, and durable construction.",
            Decimal::new(8999, 2),
            "https://images.unsplash.com/photo-1587829741301-dc798b83add3?w=500",
            "electronics",
            40,
            Decimal::new(46, 1),
        ),
        product(
            "USB-C Cable",
            "Fast charging USB-C cable, 6 feet long, compatible with all USB-C devices.",
            Decimal::new(1299, 2),
            "https://images.unsplash.com/photo-1583394838336-acd977736f90?w=500",
            "accessories",
            200,
            Decimal::new(42, 1),
        ),
        product(
            "Phone Stand",
            "Adjustable phone stand made of aluminum, compatible with all smartphone sizes.",
            Decimal::new(1999, 2),
            "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=500",
            "accessories",
            150,
            Decimal::new(41, 1),
        ),
        product(
            "Portable Power Bank",
            "10000mAh portable power bank with fast charging, dual USB ports, and LED indicator.",
            Decimal::new(3499, 2),
            "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c8?w=500",
            "electronics",
            60,
            Decimal::new(45, 1),
        ),
        product(
            "Desk Lamp",
            "LED desk lamp with adjustable brightness, color temperature control, and USB charging port.",
            Decimal::new(4999, 2),
            "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=500",
            "furniture",
            80,
            Decimal::new(44, 1),
        ),
        product(
            "Monitor Stand",
            "Ergonomic monitor stand with storage space, cable management, and adjustable height.",
            Decimal::new(3999, 2),
            "https://images.unsplash.com/photo-1586953208448-b95a79798f07?w=500",
            "furniture",
            45,
            Decimal::new(43, 1),
        ),
        product(
            "Webcam",
            "HD webcam with autofocus, built-in microphone, and privacy shutter.",
            Decimal::new(7999, 2),
            "https://images.unsplash.com/photo-1587825140708-dfaf72ae4b04?w=500",
            "electronics",
            35,
            Decimal::new(46, 1),
        ),
        product(
            "Desk Organizer",
            "Bamboo desk organizer with multiple compartments for pens, papers, and office supplies.",
            Decimal::new(2499, 2),
            "https://images.unsplash.com/photo-1484480974693-6ca0a78fb36b?w=500",
            "furniture",
            90,
            Decimal::new(42, 1),
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    sqlx::query("DELETE FROM products").execute(&db).await?;
    tracing::info!("cleared existing products");

    let store = PgStore::new(db);
    let products = sample_products();
    let count = products.len();
    for new in products {
        store.insert_product(new).await?;
    }
    tracing::info!("inserted {count} products");
    Ok(())
}
