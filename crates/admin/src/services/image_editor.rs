//! The image transform pipeline.
//!
//! Given a stored source image and an [`ImageTransform`], applies resize,
//! then rotation, then horizontal flip - in that order - and persists the
//! result as a new file. The original upload is never overwritten, so the
//! editor can always start over from it.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgba};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use thiserror::Error;

use comanda_core::{ImageTransform, TransformError};

use super::storage::{ImageStorage, StorageError, StoredImage};

/// Background color filling corners exposed by rotation.
const ROTATION_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Errors from the transform pipeline.
#[derive(Debug, Error)]
pub enum ImageEditError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    InvalidTransform(#[from] TransformError),

    #[error("could not read source image: {0}")]
    SourceUnreadable(std::io::Error),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("image task was cancelled")]
    TaskCancelled,
}

/// Apply `transform` to the stored image at `source_url` and persist the
/// result as a new file.
///
/// Returns the derived image's storage location. Decoding and pixel work run
/// on a blocking thread; the request handler only awaits.
///
/// # Errors
///
/// Fails for an out-of-range zoom, a URL outside the uploads directory, an
/// unreadable source file, or an undecodable image.
pub async fn apply_transform(
    storage: &ImageStorage,
    source_url: &str,
    transform: &ImageTransform,
) -> Result<StoredImage, ImageEditError> {
    transform.validate()?;

    let source_path = storage.resolve(source_url)?;
    let bytes = tokio::fs::read(&source_path)
        .await
        .map_err(ImageEditError::SourceUnreadable)?;

    let derived = storage.derived_image(source_url);
    storage.ensure_dir().await?;

    let output_path = derived.path.clone();
    let transform = *transform;
    tokio::task::spawn_blocking(move || -> Result<(), ImageEditError> {
        let decoded = image::load_from_memory(&bytes)?;
        let transformed = transform_image(decoded, &transform);
        save_image(&transformed, &output_path)
    })
    .await
    .map_err(|_| ImageEditError::TaskCancelled)??;

    Ok(derived)
}

/// Apply zoom, rotation, and flip, in that order.
fn transform_image(mut img: DynamicImage, transform: &ImageTransform) -> DynamicImage {
    if transform.zoom != 100 {
        let scale = f64::from(transform.zoom) / 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (f64::from(img.width()) * scale).round().max(1.0) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let height = (f64::from(img.height()) * scale).round().max(1.0) as u32;
        img = img.resize_exact(width, height, FilterType::Lanczos3);
    }

    img = match transform.normalized_rotation() {
        0 => img,
        90 => img.rotate90(),
        180 | -180 => img.rotate180(),
        -90 => img.rotate270(),
        degrees => {
            // Arbitrary angles rotate about the center; exposed corners are
            // filled with the background color.
            #[allow(clippy::cast_precision_loss)]
            let theta = (degrees as f32).to_radians();
            let rotated = rotate_about_center(
                &img.to_rgba8(),
                theta,
                Interpolation::Bilinear,
                ROTATION_BACKGROUND,
            );
            DynamicImage::ImageRgba8(rotated)
        }
    };

    if transform.flip_h {
        img = img.fliph();
    }

    img
}

/// Save the image, dropping the alpha channel for formats without one.
fn save_image(img: &DynamicImage, path: &std::path::Path) -> Result<(), ImageEditError> {
    let format = ImageFormat::from_path(path)?;
    if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8()).save(path)?;
    } else {
        img.save(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;

    fn checker(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    fn with(zoom: u32, rotation: i32, flip_h: bool) -> ImageTransform {
        ImageTransform {
            zoom,
            rotation,
            flip_h,
        }
    }

    #[test]
    fn test_zoom_scales_dimensions() {
        let out = transform_image(checker(40, 20), &with(200, 0, false));
        assert_eq!((out.width(), out.height()), (80, 40));

        let out = transform_image(checker(40, 20), &with(50, 0, false));
        assert_eq!((out.width(), out.height()), (20, 10));
    }

    #[test]
    fn test_zoom_100_leaves_dimensions() {
        let out = transform_image(checker(40, 20), &with(100, 0, false));
        assert_eq!((out.width(), out.height()), (40, 20));
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        let out = transform_image(checker(40, 20), &with(100, 90, false));
        assert_eq!((out.width(), out.height()), (20, 40));

        let out = transform_image(checker(40, 20), &with(100, -90, false));
        assert_eq!((out.width(), out.height()), (20, 40));
    }

    #[test]
    fn test_arbitrary_rotation_keeps_canvas() {
        let out = transform_image(checker(40, 20), &with(100, 45, false));
        assert_eq!((out.width(), out.height()), (40, 20));
    }

    #[test]
    fn test_flip_mirrors_pixels() {
        let mut src = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        src.put_pixel(0, 0, Rgba([0, 0, 0, 255]));

        let out = transform_image(DynamicImage::ImageRgba8(src), &with(100, 0, true));
        let out = out.to_rgba8();
        assert_eq!(out.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }
}
