use std::path::{Path, PathBuf};

use crate::encoder::{self, EncodeError};
use crate::host::{HostPresenter, PresenterError, Surface};
use crate::models::{MailDraft, MailOutcome, Photo, PhotoSource};

/// How an acquisition attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    /// A new photo replaced the current one.
    Replaced,
    /// The user dismissed the picker; the previous photo stays current.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MailState {
    Idle,
    Composing,
}

/// Error type for export operations
#[derive(Debug)]
pub enum ExportError {
    /// An export was requested with no photo selected.
    NoPhoto,
    /// The device lacks the capability backing the requested surface.
    CapabilityUnavailable(Surface),
    Encode(EncodeError),
    Presenter(PresenterError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::NoPhoto => write!(f, "No photo selected"),
            ExportError::CapabilityUnavailable(surface) => {
                write!(f, "{} is not available on this device", surface)
            }
            ExportError::Encode(e) => write!(f, "Encode error: {}", e),
            ExportError::Presenter(e) => write!(f, "Presenter error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<EncodeError> for ExportError {
    fn from(e: EncodeError) -> Self {
        ExportError::Encode(e)
    }
}

impl From<PresenterError> for ExportError {
    fn from(e: PresenterError) -> Self {
        ExportError::Presenter(e)
    }
}

/// Per-screen export context.
///
/// Holds the one live photo and the scratch directory as explicit fields
/// instead of ambient globals. Methods take the host presenter as a
/// collaborator so the pipeline runs against fakes in tests. Mail encoding
/// goes through the single scratch path; taking `&mut self` serializes
/// encode attempts should more than one action ever be queued.
pub struct ExportSession {
    photo: Option<Photo>,
    scratch_dir: PathBuf,
    mail_state: MailState,
}

impl ExportSession {
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self {
            photo: None,
            scratch_dir,
            mail_state: MailState::Idle,
        }
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn set_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
    }

    /// Acquire a photo from `source`, replacing the current one wholesale.
    ///
    /// Capability-gated: a missing camera or library aborts before any
    /// surface is presented. Cancellation is not an error; it leaves the
    /// previous photo current.
    pub fn acquire(
        &mut self,
        host: &impl HostPresenter,
        source: PhotoSource,
    ) -> Result<Acquired, ExportError> {
        let surface = match source {
            PhotoSource::Camera => Surface::Camera,
            PhotoSource::Library => Surface::Library,
        };
        if !host.is_available(surface) {
            return Err(ExportError::CapabilityUnavailable(surface));
        }
        match host.pick_photo(source) {
            Ok(path) => {
                let photo = Photo::from_path(&path)?;
                log::debug!(
                    "Photo acquired from {:?}: {}x{}",
                    path,
                    photo.width(),
                    photo.height()
                );
                self.photo = Some(photo);
                Ok(Acquired::Replaced)
            }
            Err(PresenterError::Cancelled(_)) => {
                log::debug!("Picker cancelled, keeping previous photo");
                Ok(Acquired::Cancelled)
            }
            Err(e) => Err(ExportError::Presenter(e)),
        }
    }

    /// Hand the current photo to the share sheet. Fire-and-forget.
    pub fn share(&self, host: &impl HostPresenter) -> Result<(), ExportError> {
        let photo = self.photo.as_ref().ok_or(ExportError::NoPhoto)?;
        host.present_share(photo)?;
        Ok(())
    }

    /// Open `url` in the embedded browser surface. Takes no payload.
    pub fn open_browser(&self, host: &impl HostPresenter, url: &str) -> Result<(), ExportError> {
        host.present_browser(url)?;
        Ok(())
    }

    /// Run the mail export: capability gate, encode through the scratch
    /// file, present the composer, return its outcome.
    ///
    /// Fails fast before any surface is shown when mail is unavailable or
    /// encoding fails; a null attachment is never presented. The compose
    /// surface is dismissed before the returned outcome exists, so the
    /// caller notifies strictly after dismissal.
    pub fn send_mail(
        &mut self,
        host: &impl HostPresenter,
        draft: &MailDraft,
    ) -> Result<MailOutcome, ExportError> {
        let photo = self.photo.as_ref().ok_or(ExportError::NoPhoto)?;
        if !host.is_available(Surface::Mail) {
            return Err(ExportError::CapabilityUnavailable(Surface::Mail));
        }

        let attachment = encoder::encode_attachment(photo, &self.scratch_dir)?;

        self.mail_state = MailState::Composing;
        let result = host.present_mail(draft, &attachment);
        // Terminal either way; the session is ready for the next attempt.
        self.mail_state = MailState::Idle;

        let outcome = result?;
        log::debug!("Mail compose finished: {:?}", outcome);
        Ok(outcome)
    }

    #[cfg(test)]
    fn is_composing(&self) -> bool {
        self.mail_state == MailState::Composing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{ATTACHMENT_FILENAME, ATTACHMENT_MIME_TYPE};
    use crate::models::EncodedAttachment;
    use std::cell::RefCell;

    /// Scripted host standing in for the platform surfaces.
    struct FakeHost {
        camera: bool,
        library: bool,
        mail: bool,
        pick_result: Option<Result<PathBuf, PresenterError>>,
        mail_outcome: MailOutcome,
        calls: RefCell<Vec<String>>,
        /// Snapshot taken while the composer is "open".
        seen_mail: RefCell<Option<(MailDraft, EncodedAttachment, bool)>>,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                camera: true,
                library: true,
                mail: true,
                pick_result: None,
                mail_outcome: MailOutcome::Sent,
                calls: RefCell::new(Vec::new()),
                seen_mail: RefCell::new(None),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl HostPresenter for FakeHost {
        fn is_available(&self, surface: Surface) -> bool {
            match surface {
                Surface::Camera => self.camera,
                Surface::Library => self.library,
                Surface::Mail => self.mail,
                Surface::Share | Surface::Browser => true,
            }
        }

        fn pick_photo(&self, source: PhotoSource) -> Result<PathBuf, PresenterError> {
            self.calls.borrow_mut().push(format!("pick:{:?}", source));
            self.pick_result
                .clone()
                .unwrap_or_else(|| Err(PresenterError::Other("no script".to_string())))
        }

        fn present_share(&self, photo: &Photo) -> Result<(), PresenterError> {
            self.calls
                .borrow_mut()
                .push(format!("share:{}x{}", photo.width(), photo.height()));
            Ok(())
        }

        fn present_browser(&self, url: &str) -> Result<(), PresenterError> {
            self.calls.borrow_mut().push(format!("browser:{}", url));
            Ok(())
        }

        fn present_mail(
            &self,
            draft: &MailDraft,
            attachment: &EncodedAttachment,
        ) -> Result<MailOutcome, PresenterError> {
            self.calls.borrow_mut().push("mail".to_string());
            let scratch_exists = attachment.path.exists();
            *self.seen_mail.borrow_mut() =
                Some((draft.clone(), attachment.clone(), scratch_exists));
            Ok(self.mail_outcome)
        }
    }

    fn test_photo(seed: u8) -> Photo {
        let buf = image::ImageBuffer::from_fn(24, 18, |x, y| {
            image::Rgb([seed, (x % 256) as u8, (y % 256) as u8])
        });
        Photo::from_image(image::DynamicImage::ImageRgb8(buf))
    }

    fn test_draft() -> MailDraft {
        MailDraft {
            to: "tcook@apple.com".to_string(),
            subject: "Hello from Russia".to_string(),
            body: "Hello Tim, how are you?  \n Look my attachement file 👍".to_string(),
        }
    }

    fn session_in(dir: &tempfile::TempDir) -> ExportSession {
        ExportSession::new(dir.path().to_path_buf())
    }

    #[test]
    fn export_without_photo_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        let host = FakeHost::new();

        assert!(matches!(session.share(&host), Err(ExportError::NoPhoto)));
        assert!(matches!(
            session.send_mail(&host, &test_draft()),
            Err(ExportError::NoPhoto)
        ));
        // No surface was ever presented and nothing hit the scratch dir.
        assert!(host.calls().is_empty());
        assert!(!dir.path().join(ATTACHMENT_FILENAME).exists());
    }

    #[test]
    fn mail_unavailable_never_opens_the_composer() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.set_photo(test_photo(1));
        let host = FakeHost {
            mail: false,
            ..FakeHost::new()
        };

        let err = session.send_mail(&host, &test_draft()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::CapabilityUnavailable(Surface::Mail)
        ));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn unavailable_camera_is_rejected_before_presenting() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        let host = FakeHost {
            camera: false,
            ..FakeHost::new()
        };

        let err = session.acquire(&host, PhotoSource::Camera).unwrap_err();
        assert!(matches!(
            err,
            ExportError::CapabilityUnavailable(Surface::Camera)
        ));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn cancelled_pick_keeps_previous_photo() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.set_photo(test_photo(9));
        let host = FakeHost {
            pick_result: Some(Err(PresenterError::Cancelled("dismissed".to_string()))),
            ..FakeHost::new()
        };

        let acquired = session.acquire(&host, PhotoSource::Library).unwrap();
        assert_eq!(acquired, Acquired::Cancelled);
        assert!(session.has_photo());
        assert_eq!(session.photo().unwrap().width(), 24);
    }

    #[test]
    fn acquire_replaces_photo_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let picked = dir.path().join("picked.png");
        std::fs::write(&picked, test_photo(77).to_png().unwrap()).unwrap();

        let mut session = session_in(&dir);
        let host = FakeHost {
            pick_result: Some(Ok(picked)),
            ..FakeHost::new()
        };

        let acquired = session.acquire(&host, PhotoSource::Camera).unwrap();
        assert_eq!(acquired, Acquired::Replaced);
        assert!(session.has_photo());
        assert_eq!(host.calls(), vec!["pick:Camera".to_string()]);
    }

    #[test]
    fn mail_happy_path_presents_the_fixed_draft_and_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.set_photo(test_photo(3));
        let host = FakeHost::new();

        let outcome = session.send_mail(&host, &test_draft()).unwrap();
        assert_eq!(outcome, MailOutcome::Sent);
        assert_eq!(host.calls(), vec!["mail".to_string()]);

        let seen = host.seen_mail.borrow();
        let (draft, attachment, scratch_existed) = seen.as_ref().unwrap();
        assert_eq!(draft.to, "tcook@apple.com");
        assert_eq!(draft.subject, "Hello from Russia");
        assert_eq!(attachment.filename, ATTACHMENT_FILENAME);
        assert_eq!(attachment.mime_type, ATTACHMENT_MIME_TYPE);
        // The scratch file was on disk while the composer was open, and
        // the presented buffer is byte-identical to it.
        assert!(*scratch_existed);
        assert_eq!(
            std::fs::read(&attachment.path).unwrap(),
            attachment.data.clone()
        );
    }

    #[test]
    fn composer_is_dismissed_before_the_outcome_is_usable() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.set_photo(test_photo(5));
        let host = FakeHost::new();

        let _outcome = session.send_mail(&host, &test_draft()).unwrap();
        // Once send_mail returns, composition is over and the session is
        // back to idle, ready for the next attempt.
        assert!(!session.is_composing());
        let again = session.send_mail(&host, &test_draft()).unwrap();
        assert_eq!(again, MailOutcome::Sent);
    }

    #[test]
    fn repeated_mail_attempts_reuse_the_single_scratch_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        let host = FakeHost::new();

        session.set_photo(test_photo(10));
        session.send_mail(&host, &test_draft()).unwrap();
        session.set_photo(test_photo(250));
        session.send_mail(&host, &test_draft()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![dir.path().join(ATTACHMENT_FILENAME)]);

        // Only the most recent encoding survives.
        let seen = host.seen_mail.borrow();
        let (_, attachment, _) = seen.as_ref().unwrap();
        assert_eq!(std::fs::read(&attachment.path).unwrap(), attachment.data);
    }

    #[test]
    fn browser_needs_no_photo() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(&dir);
        let host = FakeHost::new();

        session.open_browser(&host, "http://apple.com").unwrap();
        assert_eq!(host.calls(), vec!["browser:http://apple.com".to_string()]);
    }

    #[test]
    fn share_hands_over_the_raw_photo() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.set_photo(test_photo(8));
        let host = FakeHost::new();

        session.share(&host).unwrap();
        assert_eq!(host.calls(), vec!["share:24x18".to_string()]);
        // Share does not run the attachment encoder.
        assert!(!dir.path().join(ATTACHMENT_FILENAME).exists());
    }

    #[test]
    fn encoding_failure_aborts_before_the_composer() {
        let dir = tempfile::tempdir().unwrap();
        // A file standing where the scratch directory should be makes the
        // encoder's write fail.
        let blocker = dir.path().join("scratch");
        std::fs::write(&blocker, b"blocked").unwrap();

        let mut session = ExportSession::new(blocker);
        session.set_photo(test_photo(4));
        let host = FakeHost::new();

        let err = session.send_mail(&host, &test_draft()).unwrap_err();
        assert!(matches!(err, ExportError::Encode(_)));
        assert!(host.calls().is_empty());
    }
}
