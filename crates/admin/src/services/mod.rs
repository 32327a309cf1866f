//! Admin services.
//!
//! - [`storage`] - Local file storage for uploaded product images
//! - [`image_editor`] - The resize/rotate/flip transform pipeline

pub mod image_editor;
pub mod storage;

pub use image_editor::apply_transform;
pub use storage::ImageStorage;
