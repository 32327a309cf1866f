//! Integration tests for admin product management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded menu (cargo run -p comanda-cli -- seed)
//! - The admin server running (cargo run -p comanda-admin)
//!
//! Run with: cargo test -p comanda-integration-tests -- --ignored

use reqwest::{Client, StatusCode, multipart};
use serde_json::{Value, json};

use comanda_integration_tests::{admin_base_url, no_redirect_client, session_client};

/// A 1x1 white PNG, the smallest real image we can upload.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
    0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC, 0xCC, 0x59, 0xE7, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Upload the tiny PNG and return its public URL.
async fn upload_image(client: &Client) -> String {
    let base_url = admin_base_url();
    let part = multipart::Part::bytes(TINY_PNG.to_vec())
        .file_name("test.png")
        .mime_str("image/png")
        .expect("Invalid mime type");
    let form = multipart::Form::new().part("image", part);

    let resp = client
        .post(format!("{base_url}/uploads"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload image");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Invalid JSON response");
    body["url"]
        .as_str()
        .expect("Missing url in response")
        .to_owned()
}

// ============================================================================
// Product Table & Forms
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_products_index_renders() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to load product table");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Nuevo producto"));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_search_filters_products() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/?q=milanesa"))
        .send()
        .await
        .expect("Failed to search products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Milanesa napolitana"));
    assert!(!body.contains("Flan casero"));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_categories_fragment_lists_counts() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/categories"))
        .send()
        .await
        .expect("Failed to load categories fragment");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Bebidas"));
    assert!(body.contains("productos"));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_validation_messages_on_empty_form() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/products"))
        .form(&[("name", ""), ("price", ""), ("category_id", "")])
        .send()
        .await
        .expect("Failed to post product form");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("El nombre del producto es requerido"));
    assert!(body.contains("El precio es requerido y debe ser un número válido"));
    assert!(body.contains("La categoría es requerida"));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_negative_price_is_rejected() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/products"))
        .form(&[
            ("name", "Producto inválido"),
            ("price", "-5"),
            ("category_id", "1"),
        ])
        .send()
        .await
        .expect("Failed to post product form");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("El precio no puede ser negativo"));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_product_create_edit_delete_roundtrip() {
    let client = no_redirect_client();
    let base_url = admin_base_url();

    // Create
    let resp = client
        .post(format!("{base_url}/products"))
        .form(&[
            ("name", "Producto de prueba"),
            ("description", "Creado por los tests"),
            ("price", "1234.56"),
            ("category_id", "1"),
            ("in_stock", "on"),
        ])
        .send()
        .await
        .expect("Failed to create product");
    assert!(resp.status().is_redirection());

    // Find it in the table
    let body = client
        .get(format!("{base_url}/?q=Producto de prueba"))
        .send()
        .await
        .expect("Failed to search products")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Producto de prueba"));
    assert!(body.contains("$1234.56"));

    // Extract its id from the edit link (the nav's /products/new is skipped
    // because "new" is not a number)
    let id = body
        .split("/products/")
        .skip(1)
        .filter_map(|chunk| chunk.split('/').next())
        .find_map(|s| s.parse::<i32>().ok())
        .expect("Missing edit link");

    // Update
    let resp = client
        .post(format!("{base_url}/products/{id}"))
        .form(&[
            ("name", "Producto de prueba v2"),
            ("description", "Actualizado por los tests"),
            ("price", "2000"),
            ("category_id", "1"),
        ])
        .send()
        .await
        .expect("Failed to update product");
    assert!(resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/products/{id}/edit"))
        .send()
        .await
        .expect("Failed to load edit form")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Producto de prueba v2"));

    // Delete
    let resp = client
        .post(format!("{base_url}/products/{id}/delete"))
        .send()
        .await
        .expect("Failed to delete product");
    assert!(resp.status().is_redirection());

    let resp = client
        .get(format!("{base_url}/products/{id}/edit"))
        .send()
        .await
        .expect("Failed to reload edit form");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Image Upload & Transform
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_image_upload_and_transform() {
    let client = session_client();
    let base_url = admin_base_url();

    let url = upload_image(&client).await;
    assert!(url.starts_with("/uploads/product_"));
    assert!(url.ends_with(".png"));

    // The uploaded file is served back
    let resp = client
        .get(format!("{base_url}{url}"))
        .send()
        .await
        .expect("Failed to fetch uploaded image");
    assert_eq!(resp.status(), StatusCode::OK);

    // Transform it; the result is a new file, the original stays
    let resp = client
        .post(format!("{base_url}/uploads/process"))
        .json(&json!({"imageUrl": url, "zoom": 150, "rotation": 90, "flipH": true}))
        .send()
        .await
        .expect("Failed to process image");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Invalid JSON response");
    let edited_url = body["url"].as_str().expect("Missing url in response");
    assert!(edited_url.starts_with("/uploads/product_edited_"));
    assert_ne!(edited_url, url);

    let resp = client
        .get(format!("{base_url}{url}"))
        .send()
        .await
        .expect("Failed to refetch original image");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_upload_rejects_non_image() {
    let client = session_client();
    let base_url = admin_base_url();

    let part = multipart::Part::bytes(b"not an image".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .expect("Invalid mime type");
    let form = multipart::Form::new().part("image", part);

    let resp = client
        .post(format!("{base_url}/uploads"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post upload");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_process_rejects_out_of_range_zoom() {
    let client = session_client();
    let base_url = admin_base_url();

    let url = upload_image(&client).await;

    let resp = client
        .post(format!("{base_url}/uploads/process"))
        .json(&json!({"imageUrl": url, "zoom": 500}))
        .send()
        .await
        .expect("Failed to post process request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_process_rejects_path_traversal() {
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/uploads/process"))
        .json(&json!({"imageUrl": "/uploads/../../etc/passwd", "zoom": 100}))
        .send()
        .await
        .expect("Failed to post process request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
