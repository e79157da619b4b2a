use std::path::PathBuf;

use crate::models::{EncodedAttachment, MailDraft, MailOutcome, Photo, PhotoSource};

/// A host-presented surface the app can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Camera,
    Library,
    Share,
    Browser,
    Mail,
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Surface::Camera => "camera",
            Surface::Library => "photo library",
            Surface::Share => "share sheet",
            Surface::Browser => "browser",
            Surface::Mail => "mail",
        };
        write!(f, "{}", name)
    }
}

/// Error type for host surface presentation
#[derive(Debug, Clone)]
pub enum PresenterError {
    CapabilityUnavailable(String),
    Cancelled(String),
    Timeout(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PresenterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresenterError::CapabilityUnavailable(msg) => {
                write!(f, "Capability unavailable: {}", msg)
            }
            PresenterError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PresenterError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PresenterError::PlatformNotSupported(msg) => {
                write!(f, "Platform not supported: {}", msg)
            }
            PresenterError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PresenterError {}

/// The host's modal surfaces as one collaborator.
///
/// Every method presents a surface and suspends the calling action until
/// that surface has been dismissed; completion is the return value. One
/// user action is in flight at a time, so the contract is blocking rather
/// than callback-driven.
pub trait HostPresenter {
    /// Capability check the session must honor before presenting.
    fn is_available(&self, surface: Surface) -> bool;

    /// Present the camera or gallery picker; resolves to the picked file.
    fn pick_photo(&self, source: PhotoSource) -> Result<PathBuf, PresenterError>;

    /// Present the generic share sheet seeded with the photo.
    /// Fire-and-forget: no outcome beyond dismissal.
    fn present_share(&self, photo: &Photo) -> Result<(), PresenterError>;

    /// Open `url` in the embedded browser surface. No outcome.
    fn present_browser(&self, url: &str) -> Result<(), PresenterError>;

    /// Present the mail composer pre-filled with `draft` and `attachment`.
    /// Returns only after the compose surface has been dismissed; the
    /// outcome describes how composition ended.
    fn present_mail(
        &self,
        draft: &MailDraft,
        attachment: &EncodedAttachment,
    ) -> Result<MailOutcome, PresenterError>;
}

/// Filename the share sheet's staged copy is written under.
pub const SHARE_STAGING_FILENAME: &str = "share.png";

/// Host presenter backed by the platform bridge.
///
/// `staging_dir` is where the share sheet's lossless copy of the photo is
/// written so the host can read it; the mail attachment already lives at
/// the encoder's scratch path.
#[derive(Debug, Clone)]
pub struct NativeHost {
    staging_dir: PathBuf,
}

impl NativeHost {
    pub fn new(staging_dir: PathBuf) -> Self {
        Self { staging_dir }
    }

    fn stage_for_share(&self, photo: &Photo) -> Result<PathBuf, PresenterError> {
        let png = photo
            .to_png()
            .map_err(|e| PresenterError::Other(format!("Share staging failed: {}", e)))?;
        std::fs::create_dir_all(&self.staging_dir)
            .map_err(|e| PresenterError::Other(format!("Share staging failed: {}", e)))?;
        let path = self.staging_dir.join(SHARE_STAGING_FILENAME);
        std::fs::write(&path, png)
            .map_err(|e| PresenterError::Other(format!("Share staging failed: {}", e)))?;
        Ok(path)
    }
}

impl HostPresenter for NativeHost {
    fn is_available(&self, surface: Surface) -> bool {
        match surface {
            Surface::Camera => crate::picker::has_camera().unwrap_or(false),
            Surface::Library => crate::picker::has_photo_library().unwrap_or(false),
            Surface::Mail => crate::intents::can_send_mail().unwrap_or(false),
            // Share sheet and browser exist wherever the bridge does.
            Surface::Share | Surface::Browser => cfg!(target_os = "android"),
        }
    }

    fn pick_photo(&self, source: PhotoSource) -> Result<PathBuf, PresenterError> {
        crate::picker::pick_photo(source)
    }

    fn present_share(&self, photo: &Photo) -> Result<(), PresenterError> {
        let staged = self.stage_for_share(photo)?;
        crate::intents::share_image(&staged)
    }

    fn present_browser(&self, url: &str) -> Result<(), PresenterError> {
        crate::intents::open_browser(url)
    }

    fn present_mail(
        &self,
        draft: &MailDraft,
        attachment: &EncodedAttachment,
    ) -> Result<MailOutcome, PresenterError> {
        crate::intents::compose_mail(draft, attachment)
    }
}
