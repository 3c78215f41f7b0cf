use log::{error, warn};
use std::time::{Duration, Instant};

use crate::client::{Backend, FormRequest};
use crate::error::FolioError;
use crate::models::contact::{ContactDraft, ContactResponse};
use crate::models::FieldErrors;
use crate::render::html_escape;

/// The feedback box stays fully visible this long...
pub const MESSAGE_VISIBLE: Duration = Duration::from_millis(5000);
/// ...then fades out over this long before it is hidden.
pub const MESSAGE_FADE: Duration = Duration::from_millis(500);

pub const SENT: &str = "Message sent successfully! Thank you.";
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const OFFLINE: &str = "Could not send message. Please check your internet connection.";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub kind: MessageKind,
}

/// Messages of every field joined by spaces, one field per line.
/// Field names are not shown.
fn join_errors(errors: &FieldErrors) -> String {
    errors
        .values()
        .map(|msgs| msgs.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn failure_text(resp: &ContactResponse) -> String {
    let detail = match (&resp.message, &resp.errors) {
        (Some(m), _) if !m.is_empty() => m.clone(),
        (_, Some(errors)) => join_errors(errors),
        _ => GENERIC_FAILURE.to_string(),
    };
    format!("Error: {}", detail)
}

/// Contact page form and its feedback box.
#[derive(Debug, Default)]
pub struct ContactForm {
    action: String,
    csrf_token: Option<String>,
    pub draft: ContactDraft,
    submitting: bool,
    message: Option<(FormMessage, Instant)>,
}

impl ContactForm {
    pub fn new(action: impl Into<String>, csrf_token: Option<String>) -> Self {
        ContactForm {
            action: action.into(),
            csrf_token,
            ..ContactForm::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn button_label<'a>(&self, idle: &'a str) -> &'a str {
        if self.submitting {
            SENDING_LABEL
        } else {
            idle
        }
    }

    fn request(&self) -> FormRequest {
        let mut fields = Vec::new();
        if let Some(ref token) = self.csrf_token {
            fields.push(("csrfmiddlewaretoken".to_string(), token.clone()));
        }
        fields.extend(self.draft.fields());
        FormRequest {
            action: self.action.clone(),
            fields,
            csrf_token: self.csrf_token.clone(),
        }
    }

    /// Send the form. `None` while a previous submission is still in flight.
    pub fn submit(&mut self, backend: &dyn Backend, now: Instant) -> Option<&FormMessage> {
        let request = self.begin_submit()?;
        let result = backend.post_contact(&request);
        Some(self.finish_submit(result, now))
    }

    /// Disable the button and build the request. `None` if already sending.
    pub fn begin_submit(&mut self) -> Option<FormRequest> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.request())
    }

    /// Re-enable the button and show the outcome. The draft is cleared only
    /// when the server accepts it.
    pub fn finish_submit(&mut self, result: Result<ContactResponse, FolioError>, now: Instant) -> &FormMessage {
        self.submitting = false;

        let message = match result {
            Ok(resp) if resp.success => {
                self.draft = ContactDraft::default();
                FormMessage { text: SENT.to_string(), kind: MessageKind::Success }
            }
            Ok(resp) => {
                warn!("Contact form rejected: {:?}", resp.errors);
                FormMessage { text: failure_text(&resp), kind: MessageKind::Error }
            }
            Err(FolioError::Http { reason, .. }) => FormMessage {
                text: format!("Server error: {}. Please try again later.", reason),
                kind: MessageKind::Error,
            },
            Err(e) if e.is_network() => {
                error!("Network or submission error: {}", e);
                FormMessage { text: OFFLINE.to_string(), kind: MessageKind::Error }
            }
            Err(e) => {
                error!("Contact form not sent: {}", e);
                FormMessage { text: format!("Error: {}", GENERIC_FAILURE), kind: MessageKind::Error }
            }
        };
        &self.message.insert((message, now)).0
    }

    /// The message box content while it is on screen.
    pub fn message(&self, now: Instant) -> Option<&FormMessage> {
        match self.message {
            Some((ref m, at)) if now.saturating_duration_since(at) < MESSAGE_VISIBLE + MESSAGE_FADE => Some(m),
            _ => None,
        }
    }

    /// `#contact-form-message` at `now`: opaque, fading, or hidden.
    pub fn render_message(&self, now: Instant) -> String {
        let (m, at) = match self.message {
            Some((ref m, at)) => (m, at),
            None => return "<div id=\"contact-form-message\" class=\"message-box\" style=\"display: none;\"></div>".to_string(),
        };
        let age = now.saturating_duration_since(at);
        let style = if age < MESSAGE_VISIBLE {
            "display: block; opacity: 1;"
        } else if age < MESSAGE_VISIBLE + MESSAGE_FADE {
            "display: block; opacity: 0;"
        } else {
            "display: none;"
        };
        format!(
            "<div id=\"contact-form-message\" class=\"message-box {}\" style=\"{}\">{}</div>",
            m.kind.class(),
            style,
            html_escape(&m.text)
        )
    }
}
