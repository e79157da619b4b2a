use base64::Engine;
use photo_export::Photo;
use std::io::Cursor;

use crate::error::AppError;

/// Longest edge of the on-screen preview. The full-resolution photo stays
/// untouched in the session; only the preview is downscaled.
const MAX_PREVIEW_EDGE: u32 = 1024;

/// Render the current photo as a PNG data URL for the preview `img` tag.
pub fn preview_data_url(photo: &Photo) -> Result<String, AppError> {
    let preview = photo
        .as_image()
        .thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE);

    let mut buf = Cursor::new(Vec::new());
    preview
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| AppError::ImageProcessing(format!("Preview encoding failed: {}", e)))?;

    let b64 = base64::engine::general_purpose::STANDARD.encode(buf.into_inner());
    Ok(format!("data:image/png;base64,{}", b64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_a_png_data_url() {
        let buf = image::ImageBuffer::from_fn(20, 10, |x, _| image::Rgb([x as u8, 0, 0]));
        let photo = Photo::from_image(image::DynamicImage::ImageRgb8(buf));

        let url = preview_data_url(&photo).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn preview_downscales_large_photos() {
        let buf = image::ImageBuffer::from_pixel(2048, 1024, image::Rgb([9u8, 9, 9]));
        let photo = Photo::from_image(image::DynamicImage::ImageRgb8(buf));

        let url = preview_data_url(&photo).unwrap();
        let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
        let png = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert!(decoded.width() <= 1024);
        assert!(decoded.height() <= 1024);
    }
}
