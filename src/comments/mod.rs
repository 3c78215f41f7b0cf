//! Comment list, threaded replies and the comment/reply forms of a blog post.

pub mod forms;
pub mod markup;
pub mod tree;

use log::{debug, warn};
use std::collections::HashMap;
use std::time::Instant;

use crate::client::{Backend, FormRequest};
use crate::config::{PageConfig, Session};
use crate::error::FolioError;
use crate::models::comment::{CommentDraft, CommentId, CommentResponse};
use crate::models::{describe_field_errors, FieldErrors};
use crate::render::html_escape;
use crate::toast::{Toast, Toaster};

use forms::{FormState, ReplyForms};
use markup::MarkupContext;
use tree::{CommentTree, Placement};

pub const NETWORK_ERROR: &str = "A network error occurred. Please try again.";

/// Form body of a comment or reply. Signed-in visitors send no name or
/// email; the server takes them from the session.
pub fn form_request(
    action: String,
    csrf_token: Option<&str>,
    session: &Session,
    post_id: Option<i64>,
    draft: CommentDraft,
    parent: Option<CommentId>,
) -> FormRequest {
    let mut fields: Vec<(String, String)> = Vec::new();
    if let Some(token) = csrf_token {
        fields.push(("csrfmiddlewaretoken".into(), token.to_string()));
    }
    fields.push(("content".into(), draft.content));
    if session.authenticated {
        debug!("Signed in, leaving name/email out of the form data");
    } else {
        fields.push(("name".into(), draft.name));
        fields.push(("email".into(), draft.email));
    }
    fields.push(("parent".into(), parent.map(|id| id.to_string()).unwrap_or_default()));
    fields.push(("post".into(), post_id.map(|id| id.to_string()).unwrap_or_default()));

    FormRequest {
        action,
        fields,
        csrf_token: csrf_token.map(str::to_string),
    }
}

/// Which form a submission comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Main,
    Reply(CommentId),
}

/// Everything the visitor can do inside the comments section. One
/// dispatcher handles all of it, including comments added after load.
#[derive(Debug, Clone, PartialEq)]
pub enum CommentEvent {
    ReplyClicked(CommentId),
    CancelReply(CommentId),
    EditMain(CommentDraft),
    EditReply(CommentId, CommentDraft),
    Submit(Target),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitFailure {
    /// The server rejected specific fields.
    Validation(FieldErrors),
    /// `success: false` without field errors.
    Rejected,
    /// No usable answer came back.
    Network(String),
}

impl SubmitFailure {
    fn toast(&self, target: Target) -> Toast {
        match self {
            SubmitFailure::Validation(errors) => {
                Toast::error(format!("Error: {}", describe_field_errors(errors)))
            }
            SubmitFailure::Rejected => match target {
                Target::Main => Toast::error("Failed to post comment. Please try again."),
                Target::Reply(_) => Toast::error("Failed to post reply. Please try again."),
            },
            SubmitFailure::Network(_) => Toast::error(NETWORK_ERROR),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Posted { id: CommentId, placement: Placement },
    Failed(SubmitFailure),
    /// A submission of this form is already in flight.
    Busy,
    /// The page has no comment form, or the reply target is not on the page.
    Unavailable,
}

pub struct CommentSection {
    session: Session,
    post_id: Option<i64>,
    action: Option<String>,
    csrf_token: Option<String>,
    tree: CommentTree,
    reply_forms: ReplyForms,
    main_form: FormState,
    reply_states: HashMap<CommentId, FormState>,
    count: i64,
    placeholder: bool,
    toaster: Toaster,
}

impl CommentSection {
    /// `count` is the total the page header shows at load time.
    pub fn new(config: &PageConfig, tree: CommentTree, count: i64) -> Self {
        let action = config.comment_action();
        if action.is_none() {
            warn!("No comment form action configured. Comment submission disabled.");
        }
        CommentSection {
            session: config.session.clone(),
            post_id: config.post_id,
            action,
            csrf_token: config.csrf(),
            placeholder: tree.is_empty(),
            tree,
            reply_forms: ReplyForms::default(),
            main_form: FormState::default(),
            reply_states: HashMap::new(),
            count,
            toaster: Toaster::new(),
        }
    }

    pub fn tree(&self) -> &CommentTree {
        &self.tree
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn reply_forms(&self) -> &ReplyForms {
        &self.reply_forms
    }

    pub fn main_form(&self) -> &FormState {
        &self.main_form
    }

    pub fn reply_form(&self, id: CommentId) -> Option<&FormState> {
        self.reply_states.get(&id)
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Whether the "no comments yet" placeholder is still showing.
    pub fn shows_placeholder(&self) -> bool {
        self.placeholder
    }

    fn markup_context(&self) -> MarkupContext<'_> {
        MarkupContext {
            session: &self.session,
            post_id: self.post_id,
            csrf_token: self.csrf_token.as_deref(),
        }
    }

    pub fn handle(
        &mut self,
        backend: &dyn Backend,
        event: CommentEvent,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        match event {
            CommentEvent::ReplyClicked(id) => {
                if !self.tree.contains(id) {
                    warn!("Reply form container not found for comment ID: {}", id);
                    return None;
                }
                let shown = self.reply_forms.toggle(id);
                debug!("Toggled reply form for comment {}: {}", id, if shown { "open" } else { "closed" });
                None
            }
            CommentEvent::CancelReply(id) => {
                self.reply_forms.close(id);
                None
            }
            CommentEvent::EditMain(draft) => {
                self.main_form.draft = draft;
                None
            }
            CommentEvent::EditReply(id, draft) => {
                if self.tree.contains(id) {
                    self.reply_states.entry(id).or_default().draft = draft;
                }
                None
            }
            CommentEvent::Submit(target) => Some(self.submit(backend, target, now)),
        }
    }

    /// Submit a form: mark it busy, send it, apply the answer.
    pub fn submit(&mut self, backend: &dyn Backend, target: Target, now: Instant) -> SubmitOutcome {
        let request = match self.begin_submit(target) {
            Ok(r) => r,
            Err(outcome) => return outcome,
        };
        let result = backend.post_comment(&request);
        self.finish_submit(target, result, now)
    }

    /// First half of a submission: build the request and disable the form.
    /// A second call before `finish_submit` yields `Busy`.
    pub fn begin_submit(&mut self, target: Target) -> Result<FormRequest, SubmitOutcome> {
        let action = match self.action.clone() {
            Some(a) => a,
            None => return Err(SubmitOutcome::Unavailable),
        };
        if let Target::Reply(id) = target {
            if !self.tree.contains(id) {
                return Err(SubmitOutcome::Unavailable);
            }
        }

        let state = self.form_state_mut(target);
        if state.submitting {
            return Err(SubmitOutcome::Busy);
        }
        state.submitting = true;
        let draft = state.draft.clone();

        Ok(form_request(
            action,
            self.csrf_token.as_deref(),
            &self.session,
            self.post_id,
            draft,
            match target {
                Target::Main => None,
                Target::Reply(id) => Some(id),
            },
        ))
    }

    /// Second half of a submission: re-enable the form and apply the answer.
    pub fn finish_submit(
        &mut self,
        target: Target,
        result: Result<CommentResponse, FolioError>,
        now: Instant,
    ) -> SubmitOutcome {
        self.form_state_mut(target).submitting = false;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("Network or server error submitting comment form: {}", e);
                return self.fail(target, SubmitFailure::Network(e.to_string()), now);
            }
        };

        if !response.success {
            let failure = match response.errors {
                Some(errors) => {
                    warn!("Comment form submission errors: {:?}", errors);
                    SubmitFailure::Validation(errors)
                }
                None => {
                    warn!("Comment form submission failed: {:?}", response.message);
                    SubmitFailure::Rejected
                }
            };
            return self.fail(target, failure, now);
        }

        let comment = match response.comment {
            Some(c) => c,
            None => {
                return self.fail(
                    target,
                    SubmitFailure::Network("response carried no comment".into()),
                    now,
                )
            }
        };
        let id = comment.id;

        let placement = match target {
            Target::Main => {
                self.toaster.show(Toast::success("Comment posted successfully!"), now);
                self.count += 1;
                let placement = self.tree.prepend_top(comment);
                if self.placeholder {
                    debug!("Removed \"No comments yet\" message");
                    self.placeholder = false;
                }
                self.main_form.reset();
                self.reply_forms.close_all();
                placement
            }
            Target::Reply(parent) => {
                self.toaster.show(Toast::success("Reply posted successfully!"), now);
                self.count += 1;
                let placement = self.tree.append_reply(comment);
                if let Some(state) = self.reply_states.get_mut(&parent) {
                    state.reset();
                }
                self.reply_forms.close(parent);
                placement
            }
        };
        debug!("Comments count updated: {}", self.count);
        SubmitOutcome::Posted { id, placement }
    }

    fn fail(&mut self, target: Target, failure: SubmitFailure, now: Instant) -> SubmitOutcome {
        self.toaster.show(failure.toast(target), now);
        SubmitOutcome::Failed(failure)
    }

    fn form_state_mut(&mut self, target: Target) -> &mut FormState {
        match target {
            Target::Main => &mut self.main_form,
            Target::Reply(id) => self.reply_states.entry(id).or_default(),
        }
    }

    /// Inner HTML of `#comments-list`.
    pub fn render_list(&self) -> String {
        let mut html = String::new();
        if self.placeholder {
            html.push_str("<p class=\"no-comments\">No comments yet. Be the first to comment!</p>");
        }
        html.push_str(&self.tree.render(&self.markup_context(), self.reply_forms.open()));
        html
    }

    pub fn render_counter(&self) -> String {
        format!(
            "<span class=\"comment-count-badge\">{}</span>",
            html_escape(&self.count.to_string())
        )
    }
}
