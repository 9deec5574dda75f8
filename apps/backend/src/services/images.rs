//! Upload pipeline: sniff the format, decode, thumbnail, store both under
//! content-addressed keys.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::storage::{BlobStore, StoredBlob};

pub const PREVIEW_MAX_EDGE: u32 = 128;

/// Keys of a stored upload and its preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageKeys {
    pub original: String,
    pub preview: String,
}

/// One encoded image ready to be written to the store.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub key: String,
    pub bytes: Bytes,
    pub content_type: String,
}

fn extension(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpeg"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Bmp => Some("bmp"),
        _ => None,
    }
}

fn unsupported(name: &str) -> DomainError {
    DomainError::UnsupportedMedia(format!("Unsupported image format '{name}'."))
}

fn content_key(bytes: &[u8], ext: &str) -> String {
    format!("{:x}.{ext}", md5::compute(bytes))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageService;

impl ImageService {
    /// Decode `raw` and produce the original plus a preview no larger than
    /// [`PREVIEW_MAX_EDGE`] on either side, both in the upload's format.
    pub fn prepare(&self, raw: &[u8]) -> Result<(EncodedImage, EncodedImage), DomainError> {
        if raw.is_empty() {
            return Err(DomainError::validation("Uploaded file is empty."));
        }
        let format = image::guess_format(raw).map_err(|_| unsupported("unknown"))?;
        let ext = extension(format)
            .ok_or_else(|| unsupported(&format!("{format:?}").to_ascii_lowercase()))?;

        let decoded = image::load_from_memory_with_format(raw, format)
            .map_err(|e| {
                debug!(error = %e, "image decode failed");
                DomainError::UnsupportedMedia(format!(
                    "Uploaded file could not be decoded as '{ext}'."
                ))
            })?;

        let thumb = decoded.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE);
        let thumb = match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(thumb.to_rgb8()),
            _ => DynamicImage::ImageRgba8(thumb.to_rgba8()),
        };
        let mut preview = Cursor::new(Vec::new());
        thumb
            .write_to(&mut preview, format)
            .map_err(|e| crate::storage::storage_err(format!("Failed to encode preview: {e}")))?;
        let preview = preview.into_inner();

        let content_type = format!("image/{ext}");
        Ok((
            EncodedImage {
                key: content_key(raw, ext),
                bytes: Bytes::copy_from_slice(raw),
                content_type: content_type.clone(),
            },
            EncodedImage {
                key: content_key(&preview, ext),
                bytes: Bytes::from(preview),
                content_type,
            },
        ))
    }

    /// [`prepare`](Self::prepare) on the blocking pool, off the async workers.
    pub async fn prepare_offloaded(
        &self,
        raw: Bytes,
    ) -> Result<(EncodedImage, EncodedImage), DomainError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.prepare(&raw))
            .await
            .map_err(|e| {
                DomainError::infra(
                    InfraErrorKind::Other("ImageTask".into()),
                    format!("Image processing task failed: {e}"),
                )
            })?
    }

    /// Prepare and write both objects; identical uploads map to the same keys.
    pub async fn upload(&self, blobs: &dyn BlobStore, raw: Bytes) -> Result<ImageKeys, DomainError> {
        let (original, preview) = self.prepare_offloaded(raw).await?;
        blobs
            .put(&original.key, original.bytes, &original.content_type)
            .await?;
        blobs
            .put(&preview.key, preview.bytes, &preview.content_type)
            .await?;
        info!(original = %original.key, preview = %preview.key, "image stored");
        Ok(ImageKeys {
            original: original.key,
            preview: preview.key,
        })
    }

    pub async fn fetch(&self, blobs: &dyn BlobStore, key: &str) -> Result<StoredBlob, DomainError> {
        blobs.get(key).await
    }
}
