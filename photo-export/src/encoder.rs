use std::path::{Path, PathBuf};

use crate::models::{EncodedAttachment, Photo};

/// Fixed JPEG quality for mail attachments (0.5 on a 0-1 scale). Not
/// configurable.
pub const ATTACHMENT_JPEG_QUALITY: u8 = 50;

/// Scratch filename. The spelling is historical and kept everywhere; use
/// this constant instead of retyping the name.
pub const ATTACHMENT_FILENAME: &str = "attachement.jpg";

pub const ATTACHMENT_MIME_TYPE: &str = "image/jpeg";

/// Error type for attachment encoding
#[derive(Debug)]
pub enum EncodeError {
    Load(String),
    Encode(String),
    Io(std::io::Error),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::Load(msg) => write!(f, "Image load error: {}", msg),
            EncodeError::Encode(msg) => write!(f, "Image encode error: {}", msg),
            EncodeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<std::io::Error> for EncodeError {
    fn from(err: std::io::Error) -> Self {
        EncodeError::Io(err)
    }
}

/// The single well-known scratch path inside `scratch_dir`.
pub fn scratch_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(ATTACHMENT_FILENAME)
}

/// Encode `photo` through the scratch file and return the attachment.
///
/// The compressed bytes are written to the scratch path, overwriting any
/// previous attachment, and then read back from disk to form the returned
/// buffer. The returned bytes are therefore byte-identical to what is on
/// disk. On any compression or I/O failure the caller gets an error and
/// must not proceed to attach.
pub fn encode_attachment(photo: &Photo, scratch_dir: &Path) -> Result<EncodedAttachment, EncodeError> {
    let jpeg = photo.to_jpeg(ATTACHMENT_JPEG_QUALITY)?;

    std::fs::create_dir_all(scratch_dir)?;
    let path = scratch_path(scratch_dir);
    std::fs::write(&path, &jpeg)?;

    let data = std::fs::read(&path)?;
    log::debug!("Attachment encoded: {} bytes at {:?}", data.len(), path);

    Ok(EncodedAttachment {
        data,
        mime_type: ATTACHMENT_MIME_TYPE,
        filename: ATTACHMENT_FILENAME,
        path,
    })
}

/// Same as [`encode_attachment`], off the caller's thread.
pub async fn encode_attachment_async(
    photo: Photo,
    scratch_dir: PathBuf,
) -> Result<EncodedAttachment, EncodeError> {
    tokio::task::spawn_blocking(move || encode_attachment(&photo, &scratch_dir))
        .await
        .map_err(|e| EncodeError::Encode(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_photo(seed: u8) -> Photo {
        let buf = image::ImageBuffer::from_fn(48, 32, |x, y| {
            image::Rgb([seed, (x % 256) as u8, (y % 256) as u8])
        });
        Photo::from_image(image::DynamicImage::ImageRgb8(buf))
    }

    #[test]
    fn returned_bytes_match_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        let attachment = encode_attachment(&test_photo(1), dir.path()).unwrap();

        let on_disk = std::fs::read(&attachment.path).unwrap();
        assert_eq!(attachment.data, on_disk);
        assert_eq!(attachment.filename, "attachement.jpg");
        assert_eq!(attachment.mime_type, "image/jpeg");
        assert_eq!(attachment.path, dir.path().join("attachement.jpg"));
    }

    #[test]
    fn repeated_encodes_overwrite_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let first = encode_attachment(&test_photo(10), dir.path()).unwrap();
        let second = encode_attachment(&test_photo(200), dir.path()).unwrap();
        assert_ne!(first.data, second.data);

        // Exactly one file at the scratch path, holding the latest encoding.
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![second.path.clone()]);
        assert_eq!(std::fs::read(&second.path).unwrap(), second.data);
    }

    #[test]
    fn attachment_is_a_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let attachment = encode_attachment(&test_photo(42), dir.path()).unwrap();
        let format = image::guess_format(&attachment.data).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);
    }

    #[test]
    fn unwritable_scratch_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the scratch directory should be.
        let blocker = dir.path().join("scratch");
        std::fs::write(&blocker, b"in the way").unwrap();

        let result = encode_attachment(&test_photo(3), &blocker);
        assert!(matches!(result, Err(EncodeError::Io(_))));
    }

    #[tokio::test]
    async fn async_encode_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        let photo = test_photo(7);
        let sync = encode_attachment(&photo, dir.path()).unwrap();
        let from_task = encode_attachment_async(photo, dir.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(sync.data, from_task.data);
    }
}
