use std::fmt;
use std::time::{Duration, Instant};

use crate::render::html_escape;

/// How long a toast stays fully shown.
pub const TOAST_VISIBLE: Duration = Duration::from_millis(3000);
/// Fade-out before the element is removed.
pub const TOAST_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast { message: message.into(), kind: ToastKind::Success }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Toast { message: message.into(), kind: ToastKind::Error }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Toast { message: message.into(), kind: ToastKind::Info }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Shown,
    Fading,
    Gone,
}

/// The single `#toast-message` slot. A new toast replaces whatever is showing
/// and restarts the timer.
#[derive(Debug, Default)]
pub struct Toaster {
    current: Option<(Toast, Instant)>,
    history: Vec<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, toast: Toast, now: Instant) {
        log::debug!("toast [{}]: {}", toast.kind, toast.message);
        self.history.push(toast.clone());
        self.current = Some((toast, now));
    }

    pub fn phase(&self, now: Instant) -> ToastPhase {
        match self.current {
            None => ToastPhase::Gone,
            Some((_, shown_at)) => {
                let age = now.saturating_duration_since(shown_at);
                if age < TOAST_VISIBLE {
                    ToastPhase::Shown
                } else if age < TOAST_VISIBLE + TOAST_FADE {
                    ToastPhase::Fading
                } else {
                    ToastPhase::Gone
                }
            }
        }
    }

    /// The toast still in the DOM at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Toast> {
        match self.phase(now) {
            ToastPhase::Gone => None,
            _ => self.current.as_ref().map(|(t, _)| t),
        }
    }

    /// Most recent toast regardless of timing.
    pub fn last(&self) -> Option<&Toast> {
        self.history.last()
    }

    /// Every toast shown since the page loaded, oldest first.
    pub fn history(&self) -> &[Toast] {
        &self.history
    }

    pub fn render(&self, now: Instant) -> String {
        let phase = self.phase(now);
        match (&self.current, phase) {
            (Some((toast, _)), ToastPhase::Shown) => format!(
                "<div id=\"toast-message\" class=\"toast show {}\">{}</div>",
                toast.kind,
                html_escape(&toast.message)
            ),
            (Some((toast, _)), ToastPhase::Fading) => format!(
                "<div id=\"toast-message\" class=\"toast {}\">{}</div>",
                toast.kind,
                html_escape(&toast.message)
            ),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_lifecycle() {
        let t0 = Instant::now();
        let mut toaster = Toaster::new();
        assert_eq!(toaster.phase(t0), ToastPhase::Gone);

        toaster.show(Toast::success("Saved"), t0);
        assert_eq!(toaster.phase(t0 + Duration::from_millis(2999)), ToastPhase::Shown);
        assert_eq!(toaster.phase(t0 + Duration::from_millis(3100)), ToastPhase::Fading);
        assert_eq!(toaster.phase(t0 + Duration::from_millis(3300)), ToastPhase::Gone);
        assert!(toaster.visible(t0 + Duration::from_secs(4)).is_none());
    }

    #[test]
    fn new_toast_replaces_current() {
        let t0 = Instant::now();
        let mut toaster = Toaster::new();
        toaster.show(Toast::success("first"), t0);
        toaster.show(Toast::error("second"), t0 + Duration::from_millis(2900));
        let later = t0 + Duration::from_millis(4000);
        assert_eq!(toaster.visible(later).map(|t| t.message.as_str()), Some("second"));
        assert_eq!(toaster.history().len(), 2);
    }

    #[test]
    fn render_marks_kind_and_escapes() {
        let t0 = Instant::now();
        let mut toaster = Toaster::new();
        toaster.show(Toast::error("<bad>"), t0);
        assert_eq!(
            toaster.render(t0),
            "<div id=\"toast-message\" class=\"toast show error\">&lt;bad&gt;</div>"
        );
    }
}
