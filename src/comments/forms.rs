use crate::models::comment::{CommentDraft, CommentId};

pub const SUBMIT_BUSY_LABEL: &str = "Posting...";

/// Which reply form is showing. Holding a single id makes "at most one
/// open" hold by construction: opening one closes every other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyForms {
    open: Option<CommentId>,
}

impl ReplyForms {
    pub fn open(&self) -> Option<CommentId> {
        self.open
    }

    pub fn is_open(&self, id: CommentId) -> bool {
        self.open == Some(id)
    }

    /// Reply button: show this form and hide all others, or hide it if it
    /// was the one showing. Returns whether it is now visible.
    pub fn toggle(&mut self, id: CommentId) -> bool {
        if self.open == Some(id) {
            self.open = None;
            false
        } else {
            self.open = Some(id);
            true
        }
    }

    pub fn close(&mut self, id: CommentId) {
        if self.open == Some(id) {
            self.open = None;
        }
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }
}

/// A comment or reply form: what the visitor typed and whether a
/// submission is in flight (the submit button is disabled meanwhile).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: CommentDraft,
    pub submitting: bool,
}

impl FormState {
    pub fn button_label<'a>(&self, idle: &'a str) -> &'a str {
        if self.submitting {
            SUBMIT_BUSY_LABEL
        } else {
            idle
        }
    }

    pub fn reset(&mut self) {
        self.draft = CommentDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_closes_the_other() {
        let mut forms = ReplyForms::default();
        assert!(forms.toggle(1));
        assert!(forms.toggle(2));
        assert!(!forms.is_open(1));
        assert_eq!(forms.open(), Some(2));
    }

    #[test]
    fn toggling_open_form_hides_it() {
        let mut forms = ReplyForms::default();
        forms.toggle(3);
        assert!(!forms.toggle(3));
        assert_eq!(forms.open(), None);
    }

    #[test]
    fn close_only_affects_named_form() {
        let mut forms = ReplyForms::default();
        forms.toggle(3);
        forms.close(4);
        assert_eq!(forms.open(), Some(3));
        forms.close(3);
        assert_eq!(forms.open(), None);
    }

    #[test]
    fn busy_label_while_submitting() {
        let mut state = FormState::default();
        assert_eq!(state.button_label("Post Reply"), "Post Reply");
        state.submitting = true;
        assert_eq!(state.button_label("Post Reply"), SUBMIT_BUSY_LABEL);
    }
}
