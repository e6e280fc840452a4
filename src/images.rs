//! Image acquisition and the bounded image collection.
//!
//! Images enter from a local file or a remote URL and are held as base64
//! payloads with a MIME type, ready for inline embedding in a model request.
//! The collection caps at [`MAX_IMAGES`]; adding beyond the cap is a no-op.

use crate::error::ImageSourceError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Upper bound on the number of images per generation request.
pub const MAX_IMAGES: usize = 3;

const GOOGLEUSERCONTENT_BASE: &str = "https://lh3.googleusercontent.com/d";

/// An image held in memory: base64 payload (no data-URL prefix) plus MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    /// Opaque identifier used for removal
    pub id: String,
    /// Base64-encoded image bytes
    pub data: String,
    pub mime_type: String,
}

impl AcquiredImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: random_id(),
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Build from a `data:<mime>;base64,<payload>` URL, stripping the
    /// encoding-scheme prefix. Returns `None` for anything else.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime = meta.strip_suffix(";base64").unwrap_or(meta);
        let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
        Some(Self::new(payload, mime))
    }
}

fn random_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect()
}

/// MIME type for a local image file, inferred from its extension.
pub fn mime_for_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Rewrite a Google Drive sharing link to its direct-content form, taking the
/// file id from a `/d/<ID>` path segment or an `id=<ID>` query parameter.
/// Any other URL passes through verbatim.
pub fn direct_image_url(url: &str) -> String {
    if !url.contains("drive.google.com") {
        return url.to_string();
    }
    let file_id = url
        .split("/d/")
        .nth(1)
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .or_else(|| {
            url.split("id=")
                .nth(1)
                .and_then(|rest| rest.split(['&', '#']).next())
        });
    match file_id {
        Some(id) if !id.is_empty() => format!("{GOOGLEUSERCONTENT_BASE}/{id}"),
        _ => url.to_string(),
    }
}

/// Read a local file into an [`AcquiredImage`].
#[instrument(target = "snapquiz::images", skip(path), fields(path = %path.as_ref().display()))]
pub async fn acquire_from_file(path: impl AsRef<Path>) -> Result<AcquiredImage, ImageSourceError> {
    let path = path.as_ref();
    debug!("Reading image file");
    let bytes = tokio::fs::read(path).await?;
    let mime_type = mime_for_extension(path);
    info!(size = bytes.len(), mime_type, "Read image file");
    Ok(AcquiredImage::new(STANDARD.encode(&bytes), mime_type))
}

/// Fetch a remote image into an [`AcquiredImage`]. Sharing links are rewritten
/// to their direct-content form first. The MIME type comes from the
/// `Content-Type` response header.
#[instrument(target = "snapquiz::images", skip(client))]
pub async fn acquire_from_url(
    client: &reqwest::Client,
    url: &str,
) -> Result<AcquiredImage, ImageSourceError> {
    let target = direct_image_url(url);
    if target != url {
        debug!(rewritten = %target, "Rewrote sharing link to direct-content URL");
    }

    let response = client.get(&target).send().await.map_err(|e| {
        warn!(error = %e, "Image fetch failed");
        ImageSourceError::Fetch(e.to_string())
    })?;

    if !response.status().is_success() {
        warn!(status = %response.status(), "Image fetch returned non-success status");
        return Err(ImageSourceError::Fetch(format!(
            "unexpected status {}",
            response.status()
        )));
    }

    let mime_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ImageSourceError::Fetch(e.to_string()))?;

    info!(size = bytes.len(), mime_type = %mime_type, "Fetched image");
    Ok(AcquiredImage::new(STANDARD.encode(&bytes), mime_type))
}

/// Ordered collection of up to [`MAX_IMAGES`] acquired images.
#[derive(Debug, Clone, Default)]
pub struct ImageCollection {
    images: Vec<AcquiredImage>,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an image. Returns `false` (and drops the image) when
    /// the collection is already at capacity.
    pub fn add(&mut self, image: AcquiredImage) -> bool {
        if self.images.len() >= MAX_IMAGES {
            warn!(target: "snapquiz::images", "Image collection is full, ignoring add");
            return false;
        }
        self.images.push(image);
        true
    }

    /// Remove the image with the given id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != id);
        self.images.len() != before
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= MAX_IMAGES
    }

    pub fn as_slice(&self) -> &[AcquiredImage] {
        &self.images
    }

    pub fn iter(&self) -> impl Iterator<Item = &AcquiredImage> {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn drive_path_segment_is_rewritten() {
        let url = "https://drive.google.com/file/d/abc123XYZ/view?usp=sharing";
        assert_eq!(
            direct_image_url(url),
            "https://lh3.googleusercontent.com/d/abc123XYZ"
        );
    }

    #[test]
    fn drive_query_parameter_is_rewritten() {
        let url = "https://drive.google.com/open?id=abc123XYZ&authuser=0";
        assert_eq!(
            direct_image_url(url),
            "https://lh3.googleusercontent.com/d/abc123XYZ"
        );
    }

    #[test]
    fn non_drive_url_passes_through_verbatim() {
        let url = "https://example.com/photo.png?size=large";
        assert_eq!(direct_image_url(url), url);
    }

    #[test]
    fn drive_url_without_id_passes_through() {
        let url = "https://drive.google.com/drive/my-drive";
        assert_eq!(direct_image_url(url), url);
    }

    #[test]
    fn extension_mime_mapping() {
        assert_eq!(mime_for_extension(&PathBuf::from("a.PNG")), "image/png");
        assert_eq!(mime_for_extension(&PathBuf::from("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_extension(&PathBuf::from("a.jpg")), "image/jpeg");
        assert_eq!(mime_for_extension(&PathBuf::from("a.webp")), "image/webp");
        assert_eq!(
            mime_for_extension(&PathBuf::from("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let image = AcquiredImage::from_data_url("data:image/png;base64,AAAA").unwrap();
        assert_eq!(image.data, "AAAA");
        assert_eq!(image.mime_type, "image/png");
        assert!(AcquiredImage::from_data_url("https://example.com/a.png").is_none());
    }

    #[test]
    fn ids_are_unique_per_image() {
        let a = AcquiredImage::new("x", "image/png");
        let b = AcquiredImage::new("x", "image/png");
        assert_ne!(a.id, b.id);
    }
}
