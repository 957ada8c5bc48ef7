//! Integration tests for catalog browsing.
//!
//! These tests require:
//! - A running, migrated `PostgreSQL` database (larder-cli migrate)
//! - Seeded demo data (larder-cli seed)
//! - The shop server running (cargo run -p larder-shop)
//!
//! Run with: cargo test -p larder-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use larder_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires running shop server and seeded database"]
async fn test_categories_include_subcategories() {
    let client = client();

    let resp = client
        .get(format!("{}/api/v1/categories", base_url()))
        .send()
        .await
        .expect("Failed to list categories");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse categories");
    let categories = body.as_array().expect("array of categories");

    let pantry = categories
        .iter()
        .find(|c| c["slug"] == json!("pantry"))
        .expect("pantry category must be seeded");
    let subcategories = pantry["subcategories"].as_array().expect("subcategories");
    assert!(
        subcategories.iter().any(|s| s["slug"] == json!("preserves")),
        "pantry must contain the preserves subcategory"
    );
}

#[tokio::test]
#[ignore = "Requires running shop server and seeded database"]
async fn test_category_detail_by_slug() {
    let client = client();

    let resp = client
        .get(format!("{}/api/v1/categories/pantry", base_url()))
        .send()
        .await
        .expect("Failed to fetch category");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse category");
    assert_eq!(body["name"], json!("Pantry"));
    assert!(!body["subcategories"].as_array().expect("subcategories").is_empty());

    let resp = client
        .get(format!("{}/api/v1/categories/no-such-category", base_url()))
        .send()
        .await
        .expect("Failed to fetch category");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running shop server and seeded database"]
async fn test_product_listing_filters() {
    let client = client();

    // filter by subcategory slug
    let resp = client
        .get(format!(
            "{}/api/v1/products?subcategory=preserves",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse products");
    let products = body.as_array().expect("array of products");
    assert!(!products.is_empty());
    for product in products {
        assert_eq!(product["subcategory"], json!("Preserves"));
    }

    // filter by category slug reaches through the subcategory
    let resp = client
        .get(format!("{}/api/v1/products?category=pantry", base_url()))
        .send()
        .await
        .expect("Failed to list products");
    let body: Value = resp.json().await.expect("Failed to parse products");
    let products = body.as_array().expect("array of products");
    assert!(
        products.iter().any(|p| p["slug"] == json!("strawberry-jam")),
        "pantry filter must include preserves products"
    );
}

#[tokio::test]
#[ignore = "Requires running shop server and seeded database"]
async fn test_product_detail_shape() {
    let client = client();

    let resp = client
        .get(format!("{}/api/v1/products/white-truffle-oil", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(body["name"], json!("White Truffle Oil"));
    assert_eq!(body["category"], json!("Pantry"));
    assert_eq!(body["subcategory"], json!("Oils & Vinegars"));
    // prices serialize as strings
    assert_eq!(body["price"], json!("99.99"));
    assert_eq!(body["is_available"], json!(true));

    let resp = client
        .get(format!("{}/api/v1/products/no-such-product", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running shop server and seeded database"]
async fn test_unavailable_product_is_listed_but_flagged() {
    let client = client();

    let resp = client
        .get(format!("{}/api/v1/products/quince-paste", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(body["is_available"], json!(false));
}
