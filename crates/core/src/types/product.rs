//! Product read model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::image::ImageTransform;

/// A product as seen by the storefront and the cart.
///
/// This is an immutable snapshot: the cart stores a copy captured at add-time,
/// insulating the in-progress order from later catalog edits. The persistence
/// layer is the source of truth for prices and availability; the cart trusts
/// what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description shown on cards and in the checkout summary.
    pub description: String,
    /// Unit price (non-negative).
    pub price: Decimal,
    /// Category this product belongs to.
    pub category_id: CategoryId,
    /// Public URL path of the display image, if one was uploaded.
    pub image_url: Option<String>,
    /// Transform used to derive the display image from the original upload.
    pub image_data: Option<ImageTransform>,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
}
