//! Integration tests for Comanda.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare the database
//! cargo run -p comanda-cli -- migrate
//! cargo run -p comanda-cli -- seed
//!
//! # Start both servers
//! cargo run -p comanda-storefront
//! cargo run -p comanda-admin
//!
//! # Run the ignored integration tests
//! cargo test -p comanda-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Menu, cart, and checkout flow against the storefront
//! - `admin_products` - Product CRUD and image endpoints against the admin

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// Base URL for the admin panel (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_owned())
}

/// Client with a cookie store, so the storefront session (and with it the
/// cart) survives across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed; tests cannot proceed without
/// one.
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Client that does not follow redirects, for asserting on `Location`
/// headers.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
