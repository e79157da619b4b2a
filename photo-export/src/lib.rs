//! Photo export pipeline.
//!
//! Takes a photo from the camera or the gallery, encodes it as a JPEG
//! attachment through a scratch file, and hands it to one of the host's
//! presentation surfaces (share sheet, browser view, mail composer).
//! The surfaces themselves are platform capabilities reached through the
//! [`host::HostPresenter`] trait; on Android they are backed by a JNI
//! bridge to the main activity, everywhere else by explicit stubs so the
//! pipeline stays testable without a live host.

pub mod encoder;
pub mod host;
pub mod intents;
pub mod models;
pub mod picker;
pub mod session;

#[cfg(target_os = "android")]
mod bridge;

pub use encoder::{
    encode_attachment, encode_attachment_async, scratch_path, EncodeError, ATTACHMENT_FILENAME,
    ATTACHMENT_JPEG_QUALITY, ATTACHMENT_MIME_TYPE,
};
pub use host::{HostPresenter, NativeHost, PresenterError, Surface};
pub use models::{EncodedAttachment, MailDraft, MailOutcome, Photo, PhotoSource};
pub use session::{Acquired, ExportError, ExportSession};
