// Outbound host surfaces: share sheet, browser view, mail composer.
//
// Share and browser are fire-and-forget; the mail composer suspends until
// the user finishes and reports exactly one outcome, read only after the
// compose surface has been dismissed.

use std::path::Path;

use crate::host::PresenterError;
use crate::models::{EncodedAttachment, MailDraft, MailOutcome};

/// Can this device send mail at all?
#[cfg(target_os = "android")]
pub fn can_send_mail() -> Result<bool, PresenterError> {
    crate::bridge::query_bool("canSendMail")
}

/// Present the generic share sheet seeded with the staged image file.
#[cfg(target_os = "android")]
pub fn share_image(staged: &Path) -> Result<(), PresenterError> {
    let path = staged
        .to_str()
        .ok_or_else(|| PresenterError::Other(format!("Non-UTF8 path: {:?}", staged)))?;
    log::debug!("Launching share sheet for {}", path);
    crate::bridge::fire("launchShareSheet", &[path])
}

/// Open `url` in the embedded browser surface.
#[cfg(target_os = "android")]
pub fn open_browser(url: &str) -> Result<(), PresenterError> {
    log::debug!("Launching browser for {}", url);
    crate::bridge::fire("launchBrowser", &[url])
}

/// Present the mail compose surface pre-filled with `draft` and the
/// attachment, and wait (unbounded, the user decides) for the outcome.
#[cfg(target_os = "android")]
pub fn compose_mail(
    draft: &MailDraft,
    attachment: &EncodedAttachment,
) -> Result<MailOutcome, PresenterError> {
    let path = attachment
        .path
        .to_str()
        .ok_or_else(|| PresenterError::Other(format!("Non-UTF8 path: {:?}", attachment.path)))?;
    log::debug!(
        "Launching mail composer to {} with {} ({} bytes)",
        draft.to,
        attachment.filename,
        attachment.data.len()
    );
    let result = crate::bridge::run_and_wait(
        "launchMailCompose",
        &[&draft.to, &draft.subject, &draft.body, path],
        "getLastMailResult",
        None,
    );
    match result {
        Ok(raw) => Ok(parse_outcome(&raw)),
        // The composer reports cancellation as an outcome, not an error.
        Err(PresenterError::Cancelled(_)) => Ok(MailOutcome::Cancelled),
        Err(e) => Err(e),
    }
}

/// Map the bridge's result string onto the fixed outcome set.
pub fn parse_outcome(raw: &str) -> MailOutcome {
    match raw {
        "sent" => MailOutcome::Sent,
        "saved" => MailOutcome::Saved,
        "cancelled" => MailOutcome::Cancelled,
        "failed" => MailOutcome::Failed,
        _ => MailOutcome::Unknown,
    }
}

// Non-Android stubs.

#[cfg(not(target_os = "android"))]
pub fn can_send_mail() -> Result<bool, PresenterError> {
    Ok(false)
}

#[cfg(not(target_os = "android"))]
pub fn share_image(staged: &Path) -> Result<(), PresenterError> {
    let _ = staged;
    Err(PresenterError::PlatformNotSupported(
        "Share sheet not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn open_browser(url: &str) -> Result<(), PresenterError> {
    let _ = url;
    Err(PresenterError::PlatformNotSupported(
        "Browser view not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn compose_mail(
    draft: &MailDraft,
    attachment: &EncodedAttachment,
) -> Result<MailOutcome, PresenterError> {
    let _ = (draft, attachment);
    Err(PresenterError::PlatformNotSupported(
        "Mail composer not available on this platform".to_string(),
    ))
}
