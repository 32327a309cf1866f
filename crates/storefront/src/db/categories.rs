//! Category repository for the storefront (read-only).

use sqlx::PgPool;

use comanda_core::{Category, CategoryId};

use super::RepositoryError;

/// A category with its product count, as the filter bar displays it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub badge_bg: String,
    pub badge_text: String,
    pub product_count: i64,
}

impl CategoryRow {
    #[must_use]
    pub fn to_category(&self) -> Category {
        Category {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            badge_bg: self.badge_bg.clone(),
            badge_text: self.badge_text.clone(),
        }
    }
}

/// Repository for category reads.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with product counts, prefixed by the synthetic
    /// "Todos" entry covering every product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_with_counts(&self) -> Result<Vec<CategoryRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT
                c.id, c.name, c.slug, c.badge_bg, c.badge_text,
                COUNT(p.id) AS product_count
            FROM categories c
            LEFT JOIN products p ON c.id = p.category_id
            GROUP BY c.id
            ORDER BY c.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        let todos = Category::all();
        let mut categories = Vec::with_capacity(rows.len() + 1);
        categories.push(CategoryRow {
            id: todos.id,
            name: todos.name,
            slug: todos.slug,
            badge_bg: todos.badge_bg,
            badge_text: todos.badge_text,
            product_count: total,
        });
        categories.extend(rows);

        Ok(categories)
    }
}
