//! Local file storage for uploaded product images.
//!
//! Uploads land in a single flat directory served statically under
//! `/uploads`. Filenames are generated from a millisecond timestamp
//! (`product_{timestamp}{ext}`), so a stored file is never overwritten; the
//! image editor writes derived files next to the originals with its own
//! prefix.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

/// Errors from file storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid image path: {0}")]
    InvalidPath(String),
}

/// A stored image: its public URL path and its location on disk.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub url: String,
    pub path: PathBuf,
}

/// Local file storage rooted at the uploads directory.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    uploads_dir: PathBuf,
}

impl ImageStorage {
    /// Create storage rooted at `uploads_dir`.
    #[must_use]
    pub const fn new(uploads_dir: PathBuf) -> Self {
        Self { uploads_dir }
    }

    /// Store raw uploaded bytes as a new `product_{timestamp}{ext}` file.
    ///
    /// The extension is taken from the uploaded filename, defaulting to
    /// `.jpg`. The uploads directory is created on demand.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory or file cannot be written.
    pub async fn store_upload(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredImage, StorageError> {
        let ext = extension_of(original_name);
        let file_name = format!("product_{}{ext}", timestamp_millis());
        self.write(&file_name, bytes).await
    }

    /// Reserve a filename for a derived (edited) image.
    ///
    /// The editor writes the transformed image to `StoredImage::path`
    /// itself; this only picks the name, keeping the naming convention in
    /// one place.
    #[must_use]
    pub fn derived_image(&self, source_url: &str) -> StoredImage {
        let ext = extension_of(Some(source_url));
        let file_name = format!("product_edited_{}{ext}", timestamp_millis());
        StoredImage {
            url: format!("/uploads/{file_name}"),
            path: self.uploads_dir.join(file_name),
        }
    }

    /// Resolve a public `/uploads/...` URL path back to a file on disk.
    ///
    /// Rejects anything that is not a plain filename directly under the
    /// uploads directory, so a crafted URL cannot escape it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` for URLs outside `/uploads` or
    /// containing path separators.
    pub fn resolve(&self, url_path: &str) -> Result<PathBuf, StorageError> {
        let file_name = url_path
            .strip_prefix("/uploads/")
            .ok_or_else(|| StorageError::InvalidPath(url_path.to_owned()))?;

        if file_name.is_empty()
            || file_name.contains('/')
            || file_name.contains('\\')
            || file_name.contains("..")
        {
            return Err(StorageError::InvalidPath(url_path.to_owned()));
        }

        Ok(self.uploads_dir.join(file_name))
    }

    /// Ensure the uploads directory exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        Ok(())
    }

    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<StoredImage, StorageError> {
        self.ensure_dir().await?;
        let path = self.uploads_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(StoredImage {
            url: format!("/uploads/{file_name}"),
            path,
        })
    }
}

/// Milliseconds since the Unix epoch, used for unique-enough filenames.
fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

/// Dot-prefixed lowercase extension of a filename, defaulting to `.jpg`.
fn extension_of(name: Option<&str>) -> String {
    name.and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(char::is_alphanumeric))
        .map_or_else(|| ".jpg".to_owned(), |e| format!(".{}", e.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_extraction() {
        assert_eq!(extension_of(Some("photo.PNG")), ".png");
        assert_eq!(extension_of(Some("photo.jpeg")), ".jpeg");
        assert_eq!(extension_of(Some("noext")), ".jpg");
        assert_eq!(extension_of(None), ".jpg");
        // A suspicious extension falls back to the default
        assert_eq!(extension_of(Some("x.p/g")), ".jpg");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let storage = ImageStorage::new(PathBuf::from("/srv/uploads"));

        assert!(storage.resolve("/uploads/product_1.jpg").is_ok());
        assert!(storage.resolve("/etc/passwd").is_err());
        assert!(storage.resolve("/uploads/../secret").is_err());
        assert!(storage.resolve("/uploads/a/b.jpg").is_err());
        assert!(storage.resolve("/uploads/").is_err());
    }

    #[test]
    fn test_derived_image_keeps_extension() {
        let storage = ImageStorage::new(PathBuf::from("/srv/uploads"));
        let derived = storage.derived_image("/uploads/product_123.png");
        assert!(derived.url.starts_with("/uploads/product_edited_"));
        assert!(derived.url.ends_with(".png"));
    }
}
