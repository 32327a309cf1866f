//! Custom Askama template filters.

use rust_decimal::Decimal;

/// Format a decimal amount as a price string, e.g. `$19.99`.
///
/// Usage in templates: `{{ product.price|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(amount: &Decimal, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(comanda_core::money::display(*amount))
}
