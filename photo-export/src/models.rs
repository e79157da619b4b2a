use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::encoder::EncodeError;

/// Where a photo is acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
    Camera,
    Library,
}

/// In-memory photo as picked from the camera or the gallery.
///
/// The screen owns exactly one of these at a time; a new capture or
/// selection replaces it wholesale. Encoding never mutates it.
#[derive(Debug, Clone)]
pub struct Photo {
    image: image::DynamicImage,
}

impl Photo {
    pub fn from_image(image: image::DynamicImage) -> Self {
        Self { image }
    }

    /// Load a photo from a file the host picker produced.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let image = image::open(path)
            .map_err(|e| EncodeError::Load(format!("Failed to load {:?}: {}", path, e)))?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &image::DynamicImage {
        &self.image
    }

    /// Lossy JPEG bytes at the given quality.
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>, EncodeError> {
        let rgb = self.image.to_rgb8();
        let mut buf = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| EncodeError::Encode(format!("JPEG encoding failed: {}", e)))?;
        Ok(buf)
    }

    /// Lossless PNG bytes, used to stage the unchanged image for the
    /// share sheet.
    pub fn to_png(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| EncodeError::Encode(format!("PNG encoding failed: {}", e)))?;
        Ok(buf.into_inner())
    }
}

/// Compressed attachment bytes plus where they live on disk.
///
/// `data` is read back from `path` after the write, so the two are
/// byte-identical by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAttachment {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub filename: &'static str,
    pub path: PathBuf,
}

/// Pre-filled fields for the mail compose surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Terminal result of a single mail-compose attempt. Produced once per
/// attempt, consumed by the notifier, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MailOutcome {
    Sent,
    Saved,
    Cancelled,
    Failed,
    Unknown,
}
