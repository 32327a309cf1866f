//! Database seed command.
//!
//! Inserts a small sample menu so a fresh environment has something to show.
//! Re-running is safe: categories upsert on their slug and products are only
//! inserted when no product with the same name exists.

use rust_decimal::Decimal;

use super::CliError;

/// (name, slug, `badge_bg`, `badge_text`)
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("Empanadas", "empanadas", "#FDE8D7", "#7C2D12"),
    ("Pizzas", "pizzas", "#FEE2E2", "#7F1D1D"),
    ("Milanesas", "milanesas", "#FEF9C3", "#713F12"),
    ("Bebidas", "bebidas", "#DBEAFE", "#1E3A8A"),
    ("Postres", "postres", "#FCE7F3", "#831843"),
];

/// (name, description, price in cents, category slug)
const PRODUCTS: &[(&str, &str, i64, &str)] = &[
    (
        "Empanada de carne",
        "Carne cortada a cuchillo, huevo y aceitunas",
        120_000,
        "empanadas",
    ),
    (
        "Empanada de jamón y queso",
        "Jamón cocido y mozzarella",
        110_000,
        "empanadas",
    ),
    (
        "Pizza muzzarella",
        "Salsa de tomate, mozzarella y orégano",
        750_000,
        "pizzas",
    ),
    (
        "Pizza napolitana",
        "Mozzarella, tomate en rodajas y ajo",
        850_000,
        "pizzas",
    ),
    (
        "Milanesa napolitana",
        "Con jamón, mozzarella y papas fritas",
        950_000,
        "milanesas",
    ),
    ("Gaseosa 500ml", "Línea Coca-Cola", 180_000, "bebidas"),
    ("Agua sin gas 500ml", "", 120_000, "bebidas"),
    (
        "Flan casero",
        "Con dulce de leche y crema",
        380_000,
        "postres",
    ),
];

/// Seed the database with the sample menu.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    for (name, slug, badge_bg, badge_text) in CATEGORIES {
        sqlx::query(
            r"
            INSERT INTO categories (name, slug, badge_bg, badge_text)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE
            SET name = EXCLUDED.name,
                badge_bg = EXCLUDED.badge_bg,
                badge_text = EXCLUDED.badge_text
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(badge_bg)
        .bind(badge_text)
        .execute(&pool)
        .await?;
    }
    tracing::info!(count = CATEGORIES.len(), "Categories seeded");

    let mut inserted = 0_u32;
    for (name, description, price_cents, category_slug) in PRODUCTS {
        let result = sqlx::query(
            r"
            INSERT INTO products (name, description, price, category_id)
            SELECT $1, $2, $3, c.id
            FROM categories c
            WHERE c.slug = $4
              AND NOT EXISTS (SELECT 1 FROM products WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(Decimal::new(*price_cents, 2))
        .bind(category_slug)
        .execute(&pool)
        .await?;
        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }
    tracing::info!(inserted, "Products seeded");

    Ok(())
}
