//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself is a [`comanda_core::Cart`] serialized into the session;
//! every mutation loads it, applies one operation through a [`CartStore`]
//! (which publishes the resulting [`CartEvent`] to observers), and stores it
//! back. The `HX-Trigger: cart-updated` response header tells the client-side
//! views to redisplay.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use comanda_core::{Cart, CartEntry, CartEvent, CartStore, ProductId, money};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_owned(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            subtotal: money::display(cart.total_price()),
            item_count: cart.total_items(),
        }
    }
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product.id.as_i32(),
            name: entry.product.name.clone(),
            description: entry.product.description.clone(),
            quantity: entry.quantity,
            price: money::display(entry.product.price),
            line_price: money::display(entry.line_price()),
            image_url: entry.product.image_url.clone(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session cart, defaulting to an empty one.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart back into the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Wrap a session cart in an observed store.
///
/// The subscribed observer logs every published event. Toward the browser,
/// the redisplay-on-mutation notification is the HTMX trigger header the
/// handlers attach.
fn observed(cart: Cart) -> CartStore {
    let mut store = CartStore::new(cart);
    store.subscribe(|cart: &Cart, event: &CartEvent| {
        tracing::info!(
            ?event,
            total_items = cart.total_items(),
            "cart event"
        );
    });
    store
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Form data naming an existing cart entry.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add item to cart (HTMX).
///
/// Snapshots the product row into the cart at add-time, so later catalog
/// edits don't affect orders in progress. Returns the count badge with an
/// HTMX trigger to update dependent views.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let row = ProductRepository::new(state.pool())
        .get(ProductId::new(form.product_id))
        .await?;

    if !row.in_stock {
        return Err(AppError::BadRequest("product is not available".to_owned()));
    }

    // Scoped so the !Send store is dropped before the session await below.
    let cart = {
        let mut store = observed(load_cart(&session).await?);
        store.add_item(row.to_product());
        store.into_cart()
    };
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.total_items(),
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate(session, move |store| {
        store.remove_item(ProductId::new(form.product_id));
    })
    .await
}

/// Increment an entry's quantity (HTMX).
///
/// Deliberately a no-op when the product is not already in the cart; only
/// `/cart/add` creates entries.
#[instrument(skip(session))]
pub async fn increment(session: Session, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate(session, move |store| {
        store.increment_qty(ProductId::new(form.product_id));
    })
    .await
}

/// Decrement an entry's quantity, removing it at quantity 1 (HTMX).
#[instrument(skip(session))]
pub async fn decrement(session: Session, Form(form): Form<CartItemForm>) -> Result<Response> {
    mutate(session, move |store| {
        store.decrement_qty(ProductId::new(form.product_id));
    })
    .await
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Response> {
    mutate(session, |store| {
        store.clear();
    })
    .await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}

/// Apply one mutation to the session cart and respond with the items fragment.
async fn mutate<F>(session: Session, op: F) -> Result<Response>
where
    F: FnOnce(&mut CartStore),
{
    // Scoped so the !Send store is dropped before the session await below.
    let cart = {
        let mut store = observed(load_cart(&session).await?);
        op(&mut store);
        store.into_cart()
    };
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}
