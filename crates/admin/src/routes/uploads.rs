//! Image upload and transform endpoints.
//!
//! Both endpoints speak JSON and are called from the product form page. The
//! upload endpoint stores the raw file; the process endpoint reads a stored
//! file, applies a transform, and writes the result as a new file, so the
//! original is always available for re-editing.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use comanda_core::ImageTransform;

use crate::error::{AppError, Result};
use crate::services::apply_transform;
use crate::state::AppState;

/// JSON body for the transform endpoint, matching the transform stored on
/// the product record.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(flatten)]
    pub transform: ImageTransform,
}

/// JSON response carrying the public URL of a stored image.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub url: String,
}

/// Store an uploaded image and return its public URL.
///
/// Expects a multipart body with a single file field. Non-image content
/// types are rejected.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::BadRequest(
                "El archivo debe ser una imagen".to_owned(),
            ));
        }

        let file_name = field.file_name().map(ToOwned::to_owned);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest(
                "El archivo de imagen está vacío".to_owned(),
            ));
        }

        let stored = state
            .storage()
            .store_upload(file_name.as_deref(), &bytes)
            .await?;
        tracing::info!(url = %stored.url, size = bytes.len(), "Image uploaded");

        return Ok(Json(ImageResponse { url: stored.url }));
    }

    Err(AppError::BadRequest(
        "No se recibió ningún archivo".to_owned(),
    ))
}

/// Apply a transform to a stored image and return the new file's URL.
#[instrument(skip(state))]
pub async fn process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ImageResponse>> {
    let stored = apply_transform(state.storage(), &request.image_url, &request.transform).await?;
    tracing::info!(
        source = %request.image_url,
        url = %stored.url,
        "Image transformed"
    );

    Ok(Json(ImageResponse { url: stored.url }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_request_parses_editor_payload() {
        let request: ProcessRequest = serde_json::from_str(
            r#"{"imageUrl":"/uploads/product_1.jpg","zoom":150,"rotation":-30,"flipH":true}"#,
        )
        .unwrap();

        assert_eq!(request.image_url, "/uploads/product_1.jpg");
        assert_eq!(request.transform.zoom, 150);
        assert_eq!(request.transform.rotation, -30);
        assert!(request.transform.flip_h);
    }

    #[test]
    fn test_process_request_defaults_to_identity() {
        let request: ProcessRequest =
            serde_json::from_str(r#"{"imageUrl":"/uploads/product_1.jpg"}"#).unwrap();
        assert!(request.transform.is_identity());
    }
}
