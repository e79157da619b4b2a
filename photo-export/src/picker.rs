// Camera and gallery acquisition.
//
// On Android this launches the host picker through the JNI bridge and waits
// for the user to capture or select an image. Other platforms get explicit
// stubs so the desktop build still runs.

use std::path::PathBuf;

use crate::host::PresenterError;
use crate::models::PhotoSource;

/// Is a camera available on this device?
#[cfg(target_os = "android")]
pub fn has_camera() -> Result<bool, PresenterError> {
    crate::bridge::query_bool("hasCamera")
}

/// Is the photo library accessible on this device?
#[cfg(target_os = "android")]
pub fn has_photo_library() -> Result<bool, PresenterError> {
    crate::bridge::query_bool("hasPhotoLibrary")
}

/// Present the picker for `source` and wait for the user's choice.
///
/// Returns the absolute path of the captured/selected image, or
/// [`PresenterError::Cancelled`] when the user dismisses the picker.
#[cfg(target_os = "android")]
pub fn pick_photo(source: PhotoSource) -> Result<PathBuf, PresenterError> {
    let method = match source {
        PhotoSource::Camera => "launchCameraCapture",
        PhotoSource::Library => "launchGalleryPicker",
    };
    log::debug!("Launching picker: {}", method);
    let path = crate::bridge::run_and_wait(
        method,
        &[],
        "getLastPhotoPath",
        crate::bridge::picker_attempts(),
    )?;
    Ok(PathBuf::from(path))
}

// Non-Android stubs.

#[cfg(not(target_os = "android"))]
pub fn has_camera() -> Result<bool, PresenterError> {
    Ok(false)
}

#[cfg(not(target_os = "android"))]
pub fn has_photo_library() -> Result<bool, PresenterError> {
    Ok(false)
}

#[cfg(not(target_os = "android"))]
pub fn pick_photo(source: PhotoSource) -> Result<PathBuf, PresenterError> {
    let _ = source;
    Err(PresenterError::PlatformNotSupported(
        "Image picker not available on this platform".to_string(),
    ))
}
