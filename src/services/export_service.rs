use photo_export::{
    Acquired, ExportSession, HostPresenter, MailDraft, MailOutcome, NativeHost, PhotoSource,
    Surface,
};

use crate::error::AppError;
use crate::filesystem;

/// Fixed destination of the browser button.
pub const BROWSER_URL: &str = "http://apple.com";

// Fixed mail compose content.
pub const MAIL_RECIPIENT: &str = "tcook@apple.com";
pub const MAIL_SUBJECT: &str = "Hello from Russia";
pub const MAIL_BODY: &str = "Hello Tim, how are you?  \n Look my attachement file 👍";

pub fn mail_draft() -> MailDraft {
    MailDraft {
        to: MAIL_RECIPIENT.to_string(),
        subject: MAIL_SUBJECT.to_string(),
        body: MAIL_BODY.to_string(),
    }
}

fn native_host() -> NativeHost {
    NativeHost::new(filesystem::get_app_data_dir())
}

/// Session for the single screen; scratch file lives in the app data dir.
pub fn new_session() -> ExportSession {
    ExportSession::new(filesystem::get_app_data_dir())
}

/// Which picker entries the source chooser should offer.
pub fn available_photo_sources() -> (bool, bool) {
    let host = native_host();
    (
        host.is_available(Surface::Camera),
        host.is_available(Surface::Library),
    )
}

pub fn acquire_photo(
    session: &mut ExportSession,
    source: PhotoSource,
) -> Result<Acquired, AppError> {
    log::debug!("Acquiring photo from {:?}", source);
    Ok(session.acquire(&native_host(), source)?)
}

pub fn share_photo(session: &ExportSession) -> Result<(), AppError> {
    log::debug!("Presenting share sheet");
    Ok(session.share(&native_host())?)
}

pub fn open_browser(session: &ExportSession) -> Result<(), AppError> {
    log::debug!("Opening browser at {}", BROWSER_URL);
    Ok(session.open_browser(&native_host(), BROWSER_URL)?)
}

pub fn send_photo_mail(session: &mut ExportSession) -> Result<MailOutcome, AppError> {
    log::debug!("Starting mail export to {}", MAIL_RECIPIENT);
    Ok(session.send_mail(&native_host(), &mail_draft())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_carries_the_fixed_content() {
        let draft = mail_draft();
        assert_eq!(draft.to, "tcook@apple.com");
        assert_eq!(draft.subject, "Hello from Russia");
        assert!(draft.body.contains("attachement"));
    }
}
