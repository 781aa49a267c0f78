//! Upload whitelist for image payloads.
//!
//! Types are recognised by their leading magic bytes only; the client's
//! declared content type and file name are ignored.

use thiserror::Error;

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Image formats the API can store and serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
}

impl ImageKind {
    /// Detect the format from the first bytes of the payload.
    #[must_use]
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// File extension with the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Webp => ".webp",
        }
    }
}

/// Rejected upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("field '{0}' is required")]
    Missing(&'static str),
    #[error("file of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },
    #[error("file type is not allowed for field '{0}'")]
    NotAllowed(&'static str),
}

/// Which uploads the image endpoints accept.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: usize,
    allowed: Vec<ImageKind>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_BYTES,
            vec![ImageKind::Jpeg, ImageKind::Png, ImageKind::Webp],
        )
    }
}

impl UploadPolicy {
    #[must_use]
    pub const fn new(max_bytes: usize, allowed: Vec<ImageKind>) -> Self {
        Self { max_bytes, allowed }
    }

    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check a payload submitted under `field`.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when the payload is empty, too large, or not an
    /// allowed image format.
    pub fn check(&self, field: &'static str, data: &[u8]) -> Result<ImageKind, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Missing(field));
        }
        if data.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: data.len(),
                max: self.max_bytes,
            });
        }
        ImageKind::sniff(data)
            .filter(|kind| self.allowed.contains(kind))
            .ok_or(UploadError::NotAllowed(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
    const WEBP: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 ";

    #[test]
    fn test_sniff() {
        assert_eq!(ImageKind::sniff(JPEG), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(PNG), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(WEBP), Some(ImageKind::Webp));
        assert_eq!(ImageKind::sniff(b"GIF89a"), None);
        assert_eq!(ImageKind::sniff(b"RIFF\x24\x00\x00\x00WAVE"), None);
        assert_eq!(ImageKind::sniff(&[0xFF]), None);
    }

    #[test]
    fn test_default_policy() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.max_bytes(), 10 * 1024 * 1024);
        assert_eq!(policy.check("image", PNG), Ok(ImageKind::Png));
        assert_eq!(
            policy.check("image", b"%PDF-1.7"),
            Err(UploadError::NotAllowed("image"))
        );
        assert_eq!(policy.check("image", &[]), Err(UploadError::Missing("image")));
    }

    #[test]
    fn test_restricted_policy() {
        let policy = UploadPolicy::new(8, vec![ImageKind::Jpeg]);
        assert_eq!(policy.check("image", JPEG), Ok(ImageKind::Jpeg));
        assert_eq!(
            policy.check("image", WEBP),
            Err(UploadError::TooLarge { size: 16, max: 8 })
        );
        assert_eq!(
            policy.check("image", &PNG[..8]),
            Err(UploadError::NotAllowed("image"))
        );
    }
}
