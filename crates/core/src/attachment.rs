//! Attachment encoding for inline request parts.
//!
//! A selected image or video frame is read, base64-encoded, and paired with
//! its media type so it can travel inside the request body instead of by URL.

use crate::error::{AppError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ImageFormat;
use std::path::Path;
use tracing::{debug, instrument};

/// Fallback when neither the content nor the file name reveals a type.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// An encoded binary payload ready to be sent as an inline part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Declared media type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// Standard base64 of the raw bytes, without any data-URL prefix.
    pub data: String,
}

impl Attachment {
    /// Reads and encodes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the file cannot be read and
    /// [`AppError::Attachment`] if it is empty.
    #[instrument(level = "debug", skip_all, fields(file = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let mime_type = detect_mime_type(&bytes, Some(path));
        let attachment = Self::from_bytes(&bytes, Some(&mime_type))?;
        debug!(
            mime_type = %attachment.mime_type,
            bytes = bytes.len(),
            encoded = attachment.data.len(),
            "attachment encoded"
        );
        Ok(attachment)
    }

    /// Encodes raw bytes.
    ///
    /// A declared media type is used verbatim; otherwise it is sniffed from
    /// the content.
    pub fn from_bytes(bytes: &[u8], declared_mime: Option<&str>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AppError::attachment("no content could be extracted from the file"));
        }

        let mime_type = match declared_mime {
            Some(mime) if !mime.trim().is_empty() => mime.trim().to_string(),
            _ => detect_mime_type(bytes, None),
        };

        Ok(Self {
            mime_type,
            data: BASE64.encode(bytes),
        })
    }

    /// Builds an attachment from a `data:<mime>;base64,<payload>` URL.
    ///
    /// The prefix is stripped so only the payload is transmitted. A string
    /// without a prefix is taken as bare base64 of unknown type.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let (mime_type, payload) = match url.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| AppError::attachment("data URL has no payload separator"))?;
                let mime = header.split(';').next().unwrap_or_default();
                let mime = if mime.is_empty() { OCTET_STREAM } else { mime };
                (mime.to_string(), payload)
            }
            None => (OCTET_STREAM.to_string(), url),
        };

        if payload.trim().is_empty() {
            return Err(AppError::attachment("no content could be extracted from the data URL"));
        }

        Ok(Self {
            mime_type,
            data: payload.trim().to_string(),
        })
    }

    /// Whether the picker's accept filter (images and videos) admits this attachment.
    pub fn is_accepted(&self) -> bool {
        is_accepted_media_type(&self.mime_type)
    }
}

/// Accept filter of the file picker: any image or video type.
pub fn is_accepted_media_type(mime_type: &str) -> bool {
    let mime = mime_type.to_ascii_lowercase();
    mime.starts_with("image/") || mime.starts_with("video/")
}

/// Determines a media type from magic bytes, then from the file extension.
pub fn detect_mime_type(bytes: &[u8], path: Option<&Path>) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    path.and_then(|p| ImageFormat::from_path(p).ok())
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
