use dioxus::prelude::*;
use photo_export::{Acquired, PhotoSource};

use crate::image_processing;
use crate::services::export_service;
use crate::services::notifier::{self, Notification};

/// The single screen: photo preview plus the four export buttons, with the
/// source chooser and the acknowledgement alert as modal overlays.
#[component]
pub fn HomeScreen() -> Element {
    let mut session = use_signal(export_service::new_session);
    let mut preview = use_signal(|| None::<String>);
    let mut alert = use_signal(|| None::<Notification>);
    let mut show_source_sheet = use_signal(|| false);
    let mut sources = use_signal(|| (false, false));
    let mut busy = use_signal(|| false);

    let mut pick_from = move |source: PhotoSource| {
        show_source_sheet.set(false);
        busy.set(true);
        spawn(async move {
            let result = export_service::acquire_photo(&mut session.write(), source);
            match result {
                Ok(Acquired::Replaced) => {
                    let url = session
                        .read()
                        .photo()
                        .map(image_processing::preview_data_url);
                    match url {
                        Some(Ok(u)) => preview.set(Some(u)),
                        Some(Err(e)) => alert.set(Some(notifier::notification_for_error(&e))),
                        None => {}
                    }
                }
                // Previous photo (if any) stays current.
                Ok(Acquired::Cancelled) => {}
                Err(e) => alert.set(Some(notifier::notification_for_error(&e))),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "screen",

            // Preview
            div { class: "preview-area",
                if let Some(url) = preview() {
                    img { class: "preview", src: "{url}" }
                } else {
                    div { class: "preview-empty", "No photo selected" }
                }
            }

            // Export buttons
            div { class: "button-row",
                button {
                    class: "btn-primary",
                    disabled: busy(),
                    onclick: move |_| {
                        // Short-circuit without a photo, like the share guard.
                        if !session.read().has_photo() {
                            return;
                        }
                        spawn(async move {
                            if let Err(e) = export_service::share_photo(&session.read()) {
                                alert.set(Some(notifier::notification_for_error(&e)));
                            }
                        });
                    },
                    "📤 Share"
                }
                button {
                    class: "btn-primary",
                    disabled: busy(),
                    onclick: move |_| {
                        spawn(async move {
                            if let Err(e) = export_service::open_browser(&session.read()) {
                                alert.set(Some(notifier::notification_for_error(&e)));
                            }
                        });
                    },
                    "🌐 Browser"
                }
                button {
                    class: "btn-primary",
                    disabled: busy(),
                    onclick: move |_| {
                        sources.set(export_service::available_photo_sources());
                        show_source_sheet.set(true);
                    },
                    "📷 Photo"
                }
                button {
                    class: "btn-primary",
                    disabled: busy(),
                    onclick: move |_| {
                        if !session.read().has_photo() {
                            return;
                        }
                        busy.set(true);
                        spawn(async move {
                            let result = export_service::send_photo_mail(&mut session.write());
                            match result {
                                Ok(outcome) => {
                                    alert.set(Some(notifier::notification_for_outcome(outcome)));
                                }
                                Err(e) => alert.set(Some(notifier::notification_for_error(&e))),
                            }
                            busy.set(false);
                        });
                    },
                    "✉️ Email"
                }
            }

            // Source chooser (camera / library), entries gated on capability
            if show_source_sheet() {
                div { class: "overlay",
                    div { class: "sheet",
                        div { class: "sheet-title", "Please Choose Image Source" }
                        if sources().0 {
                            button {
                                class: "btn-secondary",
                                onclick: move |_| pick_from(PhotoSource::Camera),
                                "Camera"
                            }
                        }
                        if sources().1 {
                            button {
                                class: "btn-secondary",
                                onclick: move |_| pick_from(PhotoSource::Library),
                                "Photo Library"
                            }
                        }
                        button {
                            class: "btn-secondary",
                            onclick: move |_| show_source_sheet.set(false),
                            "Cancel"
                        }
                    }
                }
            }

            // Single-button acknowledgement alert
            if let Some(n) = alert() {
                div { class: "overlay",
                    div { class: "alert",
                        div { class: "alert-title", "{n.title}" }
                        div { class: "alert-message", "{n.message}" }
                        button {
                            class: "btn-primary",
                            onclick: move |_| alert.set(None),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}
