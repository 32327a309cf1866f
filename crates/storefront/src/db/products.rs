//! Product repository for the storefront (read-only).

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use comanda_core::{CategoryId, ImageTransform, Product, ProductId};

use super::RepositoryError;

/// A product row joined with its category, as the menu displays it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub category_slug: String,
    pub category_name: String,
    pub badge_bg: String,
    pub badge_text: String,
    pub image_url: Option<String>,
    pub image_data: Option<Json<ImageTransform>>,
    pub in_stock: bool,
}

impl ProductRow {
    /// The read-model snapshot the cart captures at add-time.
    #[must_use]
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category_id: self.category_id,
            image_url: self.image_url.clone(),
            image_data: self.image_data.as_ref().map(|data| data.0),
            in_stock: self.in_stock,
        }
    }
}

const PRODUCT_SELECT: &str = r"
    SELECT
        p.id, p.name, p.description, p.price, p.category_id,
        p.image_url, p.image_data, p.in_stock,
        c.slug AS category_slug, c.name AS category_name,
        c.badge_bg, c.badge_text
    FROM products p
    JOIN categories c ON p.category_id = c.id
";

/// Repository for product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by category slug.
    ///
    /// The slug `todos` (the synthetic all-products category) behaves like no
    /// filter at all. Newest products come first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category_slug: Option<&str>,
    ) -> Result<Vec<ProductRow>, RepositoryError> {
        let filter = category_slug.filter(|slug| *slug != "todos");

        let rows = match filter {
            Some(slug) => {
                let query = format!("{PRODUCT_SELECT} WHERE c.slug = $1 ORDER BY p.created_at DESC");
                sqlx::query_as::<_, ProductRow>(&query)
                    .bind(slug)
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                let query = format!("{PRODUCT_SELECT} ORDER BY p.created_at DESC");
                sqlx::query_as::<_, ProductRow>(&query)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(rows)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matches, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<ProductRow, RepositoryError> {
        let query = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
