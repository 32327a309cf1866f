//! Category listing route handler.
//!
//! Categories are managed by seeding; the admin only reads them. This
//! fragment backs the category overview on the product table page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::CategoryRepository;
use crate::error::Result;
use crate::routes::products::CategoryOptionView;
use crate::state::AppState;

/// Category list fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/categories.html")]
pub struct CategoriesTemplate {
    pub categories: Vec<CategoryOptionView>,
}

/// List all categories with their product counts.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<CategoriesTemplate> {
    let categories = CategoryRepository::new(state.pool())
        .list_with_counts()
        .await?;

    Ok(CategoriesTemplate {
        categories: categories.iter().map(CategoryOptionView::from).collect(),
    })
}
