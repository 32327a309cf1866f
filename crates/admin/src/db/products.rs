//! Product repository for the admin panel (full CRUD).

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use comanda_core::{CategoryId, ImageTransform, ProductId};

use super::RepositoryError;

/// A product row joined with its category.
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

/// Validated fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub image_data: Option<ImageTransform>,
    pub in_stock: bool,
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

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by category slug and name search.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category_slug: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<ProductRow>, RepositoryError> {
        let filter = category_slug.filter(|slug| *slug != "todos");

        let query = format!(
            r"{PRODUCT_SELECT}
            WHERE ($1::text IS NULL OR c.slug = $1)
              AND ($2::text IS NULL OR p.name ILIKE '%' || $2 || '%')
            ORDER BY p.created_at DESC"
        );

        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .bind(filter)
            .bind(search)
            .fetch_all(self.pool)
            .await?;

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

    /// Create a product and return the joined row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` for an unknown category, or
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, input: &ProductInput) -> Result<ProductRow, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO products (name, description, price, category_id, image_url, image_data, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category_id)
        .bind(&input.image_url)
        .bind(input.image_data.map(Json))
        .bind(input.in_stock)
        .fetch_one(self.pool)
        .await
        .map_err(foreign_key_as_conflict)?;

        self.get(ProductId::new(id)).await
    }

    /// Update a product and return the joined row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// `RepositoryError::Conflict` for an unknown category, or
    /// `RepositoryError::Database` for other failures.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<ProductRow, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = $1, description = $2, price = $3, category_id = $4,
                image_url = $5, image_data = $6, in_stock = $7, updated_at = NOW()
            WHERE id = $8
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.category_id)
        .bind(&input.image_url)
        .bind(input.image_data.map(Json))
        .bind(input.in_stock)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(foreign_key_as_conflict)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist, or
    /// `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Map foreign-key violations (unknown category) to `Conflict`.
fn foreign_key_as_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict("unknown category".to_owned());
    }
    RepositoryError::Database(e)
}
