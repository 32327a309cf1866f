//! Core types for Comanda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod image;
pub mod money;
pub mod product;

pub use category::Category;
pub use id::*;
pub use image::{ImageTransform, TransformError, ZOOM_MAX, ZOOM_MIN};
pub use product::Product;
