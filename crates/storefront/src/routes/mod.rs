//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Menu page (category filter via ?category=slug)
//! GET  /health           - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart             - Cart page
//! POST /cart/add         - Add product (returns count fragment, triggers cart-updated)
//! POST /cart/remove      - Remove entry (returns cart_items fragment)
//! POST /cart/increment   - Increment quantity (returns cart_items fragment)
//! POST /cart/decrement   - Decrement quantity (returns cart_items fragment)
//! POST /cart/clear       - Empty the cart (returns cart_items fragment)
//! GET  /cart/count       - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout         - Order summary + delivery details form
//! POST /checkout         - Hand the order off to WhatsApp and clear the cart
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/increment", post(cart::increment))
        .route("/cart/decrement", post(cart::decrement))
        .route("/cart/clear", post(cart::clear))
        .route("/cart/count", get(cart::count))
        .route("/checkout", get(checkout::show).post(checkout::confirm))
}
