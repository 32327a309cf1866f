//! Checkout route handlers.
//!
//! The checkout page shows the order summary and a delivery details form.
//! Confirming builds the WhatsApp message from the session cart, clears the
//! cart, and redirects the customer to the `wa.me` hand-off URL. The message
//! formatter's precondition (never called on an empty cart) is enforced here
//! by redirecting empty carts back to the menu.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use comanda_core::checkout::{OrderDetails, order_message, whatsapp_url};

use super::cart::{CartView, load_cart, save_cart};
use crate::error::Result;
use crate::state::AppState;

/// Delivery details form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub cart: CartView,
}

/// Display the checkout page.
///
/// An empty cart has nothing to check out; redirect back to the menu.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(CheckoutShowTemplate {
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Confirm the order: hand it off to WhatsApp and clear the cart.
#[instrument(skip(state, session, form))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/").into_response());
    }

    let details = OrderDetails {
        name: form.name,
        phone: form.phone,
        notes: form.notes,
    };
    let message = order_message(&cart, &details);
    let url = whatsapp_url(&state.config().whatsapp_number, &message);

    tracing::info!(
        total_items = cart.total_items(),
        "order handed off to WhatsApp"
    );

    // The in-progress order is done; the next session starts fresh
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Redirect::to(&url).into_response())
}
