//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product table (?category=slug, ?q=search)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/new           - Blank product form
//! POST /products               - Create product
//! GET  /products/{id}/edit     - Edit form for one product
//! POST /products/{id}          - Update product
//! POST /products/{id}/delete   - Delete product
//!
//! # Categories
//! GET  /categories             - Category list fragment with product counts
//!
//! # Images (JSON, called by the form page)
//! POST /uploads                - Store an uploaded image, returns its URL
//! POST /uploads/process        - Apply zoom/rotation/flip, returns new URL
//! ```

pub mod categories;
pub mod products;
pub mod uploads;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/products/new", get(products::new_form))
        .route("/products", post(products::create))
        .route("/products/{id}/edit", get(products::edit_form))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/delete", post(products::delete))
        .route("/categories", get(categories::list))
        .route("/uploads", post(uploads::upload))
        .route("/uploads/process", post(uploads::process))
}
