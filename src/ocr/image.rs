//! Image transport encoding.

use std::path::Path;

use base64::Engine;

use super::backend::OcrError;

/// A base64-encoded image, encoded once and reused for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    base64: String,
    mime_type: Option<&'static str>,
}

impl ImagePayload {
    /// Read an image file and encode it for transport.
    ///
    /// Files whose content is recognisably not an image are rejected.
    pub fn from_path(path: &Path) -> Result<Self, OcrError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            OcrError::Image(reason) => OcrError::Image(format!("{}: {}", path.display(), reason)),
            other => other,
        })
    }

    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OcrError> {
        if bytes.is_empty() {
            return Err(OcrError::Image("empty file".to_string()));
        }

        let mime_type = match infer::get(bytes) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
                Some(kind.mime_type())
            }
            Some(kind) => {
                return Err(OcrError::Image(format!(
                    "not an image ({})",
                    kind.mime_type()
                )))
            }
            None => None,
        };

        Ok(Self {
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type,
        })
    }

    /// Wrap data that is already base64-encoded.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self {
            base64: data.into(),
            mime_type: None,
        }
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Detected MIME type, when the format was recognised.
    pub fn mime_type(&self) -> Option<&'static str> {
        self.mime_type
    }
}
