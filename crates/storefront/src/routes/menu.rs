//! Menu route handlers.
//!
//! The menu is the home page: a category filter bar plus product cards.
//! Filtering happens server-side via the `?category=slug` query parameter.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{CategoryRepository, ProductRepository, categories::CategoryRow,
    products::ProductRow};
use crate::error::Result;
use crate::filters;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Menu filter query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub category_name: String,
    pub badge_bg: String,
    pub badge_text: String,
}

impl From<&ProductRow> for ProductCardView {
    fn from(row: &ProductRow) -> Self {
        Self {
            id: row.id.as_i32(),
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price,
            image_url: row.image_url.clone(),
            in_stock: row.in_stock,
            category_name: row.category_name.clone(),
            badge_bg: row.badge_bg.clone(),
            badge_text: row.badge_text.clone(),
        }
    }
}

/// Category pill display data for the filter bar.
#[derive(Clone)]
pub struct CategoryPillView {
    pub name: String,
    pub slug: String,
    pub product_count: i64,
    pub badge_bg: String,
    pub badge_text: String,
    pub active: bool,
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub categories: Vec<CategoryPillView>,
    pub products: Vec<ProductCardView>,
    pub cart_count: u32,
}

/// Display the menu page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<MenuIndexTemplate> {
    let active_slug = query.category.as_deref().unwrap_or("todos");

    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;
    let products = ProductRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;
    let cart = load_cart(&session).await?;

    let categories = categories
        .iter()
        .map(|row: &CategoryRow| CategoryPillView {
            name: row.name.clone(),
            slug: row.slug.clone(),
            product_count: row.product_count,
            badge_bg: row.badge_bg.clone(),
            badge_text: row.badge_text.clone(),
            active: row.slug == active_slug,
        })
        .collect();

    Ok(MenuIndexTemplate {
        categories,
        products: products.iter().map(ProductCardView::from).collect(),
        cart_count: cart.total_items(),
    })
}
