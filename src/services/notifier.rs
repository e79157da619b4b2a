use photo_export::{ExportError, MailOutcome, Surface};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Title/message pair for the single-button acknowledgement dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Static table mapping each mail outcome to its dialog copy.
pub fn notification_for_outcome(outcome: MailOutcome) -> Notification {
    match outcome {
        MailOutcome::Sent => Notification::new("Sent", "You sent the email."),
        MailOutcome::Saved => Notification::new("Saved", "You saved a draft of this email"),
        MailOutcome::Cancelled => {
            Notification::new("Cancelled", "You cancelled sending this email.")
        }
        MailOutcome::Failed => Notification::new(
            "Failed",
            "Mail failed:  An error occurred when trying to compose this email",
        ),
        MailOutcome::Unknown => Notification::new(
            "Error",
            "An error occurred when trying to compose this email",
        ),
    }
}

/// Dialog copy for a failed export action.
pub fn notification_for_error(error: &AppError) -> Notification {
    match error {
        AppError::Export(ExportError::CapabilityUnavailable(Surface::Mail)) => {
            Notification::new("Sorry Bro", "Mail services are not available")
        }
        other => Notification::new("Error", &other.user_message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_outcome_maps_to_a_distinct_notification() {
        let outcomes = [
            MailOutcome::Sent,
            MailOutcome::Saved,
            MailOutcome::Cancelled,
            MailOutcome::Failed,
            MailOutcome::Unknown,
        ];
        let notifications: Vec<_> = outcomes
            .iter()
            .map(|o| notification_for_outcome(*o))
            .collect();
        for (i, a) in notifications.iter().enumerate() {
            for b in notifications.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn sent_outcome_is_titled_sent() {
        let n = notification_for_outcome(MailOutcome::Sent);
        assert_eq!(n.title, "Sent");
        assert_eq!(n.message, "You sent the email.");
    }

    #[test]
    fn missing_mail_capability_is_sorry_bro() {
        let error = AppError::Export(ExportError::CapabilityUnavailable(Surface::Mail));
        let n = notification_for_error(&error);
        assert_eq!(n.title, "Sorry Bro");
        assert_eq!(n.message, "Mail services are not available");
    }

    #[test]
    fn other_errors_get_a_generic_title() {
        let error = AppError::Export(ExportError::NoPhoto);
        let n = notification_for_error(&error);
        assert_eq!(n.title, "Error");
        assert_eq!(n.message, "No photo selected.");
    }
}
