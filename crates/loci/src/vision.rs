//! Image-description seam used by the pipeline's vision node.
//!
//! The provider receives an image (path or raw bytes) and returns a text
//! description, or fails. `ChatGemini` is the real implementation;
//! `MockVision` serves tests and offline demos.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::llm::LlmError;

/// An image handed to a vision provider.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Read from disk at describe time.
    Path(PathBuf),
    /// In-memory bytes with their mime type.
    Bytes {
        /// Raw image data.
        data: Vec<u8>,
        /// Mime type, e.g. `image/png`.
        mime: String,
    },
}

impl ImageSource {
    /// Image at a filesystem path.
    pub fn path(p: impl Into<PathBuf>) -> Self {
        Self::Path(p.into())
    }

    /// In-memory image bytes.
    pub fn bytes(data: Vec<u8>, mime: impl Into<String>) -> Self {
        Self::Bytes {
            data,
            mime: mime.into(),
        }
    }
}

/// Mime type guessed from a file extension. JPEG for `.jpg`/`.jpeg`,
/// PNG otherwise.
pub(crate) fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}

/// Vision provider seam: image in, text description out.
///
/// **Interaction**: Implemented by `ChatGemini` and `MockVision`;
/// consumed by `argue::VisionNode`.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Describes the image, or fails.
    async fn describe(&self, image: &ImageSource) -> Result<String, LlmError>;
}

/// Mock vision provider returning a fixed description.
pub struct MockVision {
    description: String,
}

impl MockVision {
    /// Always describes any image with `description`.
    pub fn fixed(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

#[async_trait]
impl VisionClient for MockVision {
    async fn describe(&self, _image: &ImageSource) -> Result<String, LlmError> {
        Ok(self.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_by_extension() {
        assert_eq!(mime_for_path(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("noext")), "image/png");
    }

    #[tokio::test]
    async fn mock_vision_ignores_image() {
        let v = MockVision::fixed("two people at a concert");
        let out = v.describe(&ImageSource::path("x.png")).await.unwrap();
        assert_eq!(out, "two people at a concert");
    }
}
