//! Image transform parameters.
//!
//! Describes how a product's displayed image was derived from its original
//! upload. Stored as JSON alongside the product (`image_data` column) so the
//! admin image editor can restore the same visual state later.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum zoom percentage accepted by the editor.
pub const ZOOM_MIN: u32 = 10;
/// Maximum zoom percentage accepted by the editor.
pub const ZOOM_MAX: u32 = 200;

/// Errors validating transform parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("zoom must be between {ZOOM_MIN} and {ZOOM_MAX} percent, got {0}")]
    ZoomOutOfRange(u32),
}

/// The (zoom, rotation, flip) triple describing a derived image.
///
/// Field names match the JSON produced by the image editor
/// (`{"zoom": 120, "rotation": -90, "flipH": true}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransform {
    /// Zoom percentage, 100 = unchanged.
    #[serde(default = "default_zoom")]
    pub zoom: u32,
    /// Rotation in whole degrees, normalized to [-180, 180].
    #[serde(default)]
    pub rotation: i32,
    /// Mirror the image horizontally.
    #[serde(default, rename = "flipH")]
    pub flip_h: bool,
}

const fn default_zoom() -> u32 {
    100
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            zoom: 100,
            rotation: 0,
            flip_h: false,
        }
    }
}

impl ImageTransform {
    /// Whether applying this transform would leave the image unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.zoom == 100 && self.normalized_rotation() == 0 && !self.flip_h
    }

    /// Rotation wrapped into the [-180, 180] range.
    ///
    /// The editor sends whole degrees; 270 and -90 describe the same rotation
    /// and normalize to the same value.
    #[must_use]
    pub const fn normalized_rotation(&self) -> i32 {
        let mut deg = self.rotation % 360;
        if deg > 180 {
            deg -= 360;
        } else if deg < -180 {
            deg += 360;
        }
        deg
    }

    /// Validate the zoom range.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ZoomOutOfRange`] when zoom is outside
    /// [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    pub const fn validate(&self) -> Result<(), TransformError> {
        if self.zoom < ZOOM_MIN || self.zoom > ZOOM_MAX {
            return Err(TransformError::ZoomOutOfRange(self.zoom));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_normalization() {
        let t = |rotation| ImageTransform {
            rotation,
            ..ImageTransform::default()
        };
        assert_eq!(t(0).normalized_rotation(), 0);
        assert_eq!(t(90).normalized_rotation(), 90);
        assert_eq!(t(180).normalized_rotation(), 180);
        assert_eq!(t(270).normalized_rotation(), -90);
        assert_eq!(t(-270).normalized_rotation(), 90);
        assert_eq!(t(360).normalized_rotation(), 0);
        assert_eq!(t(-180).normalized_rotation(), -180);
    }

    #[test]
    fn test_zoom_validation() {
        let t = |zoom| ImageTransform {
            zoom,
            ..ImageTransform::default()
        };
        assert!(t(100).validate().is_ok());
        assert!(t(10).validate().is_ok());
        assert!(t(200).validate().is_ok());
        assert_eq!(t(9).validate(), Err(TransformError::ZoomOutOfRange(9)));
        assert_eq!(t(201).validate(), Err(TransformError::ZoomOutOfRange(201)));
    }

    #[test]
    fn test_identity() {
        assert!(ImageTransform::default().is_identity());
        assert!(
            ImageTransform {
                rotation: 360,
                ..ImageTransform::default()
            }
            .is_identity()
        );
        assert!(
            !ImageTransform {
                flip_h: true,
                ..ImageTransform::default()
            }
            .is_identity()
        );
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{"zoom":120,"rotation":-45,"flipH":true}"#;
        let transform: ImageTransform = serde_json::from_str(json).expect("valid json");
        assert_eq!(transform.zoom, 120);
        assert_eq!(transform.rotation, -45);
        assert!(transform.flip_h);

        // Partial data from older rows still deserializes
        let partial: ImageTransform = serde_json::from_str(r#"{"zoom":150}"#).expect("valid json");
        assert_eq!(partial.zoom, 150);
        assert_eq!(partial.rotation, 0);
        assert!(!partial.flip_h);
    }
}
