use log::{debug, error};
use std::time::Instant;

use crate::client::Backend;
use crate::error::FolioError;
use crate::models::like::LikeResponse;
use crate::render::html_escape;
use crate::toast::{Toast, Toaster};

pub const LOGIN_REQUIRED: &str = "Please log in to like this post.";
pub const LIKE_FAILED: &str = "Failed to process like. Please try again.";
pub const LIKE_NETWORK_ERROR: &str = "A network error occurred while processing your like.";

/// What a click on the like button did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    Toggled { liked: bool, count: i64 },
    /// Visitor is not signed in; no request was sent.
    LoginRequired,
    Rejected,
    /// A request is already in flight.
    Busy,
    Failed(String),
}

/// The post's like button and counter.
#[derive(Debug, Clone)]
pub struct LikeButton {
    path: String,
    authenticated: bool,
    count: i64,
    liked: bool,
    busy: bool,
}

impl LikeButton {
    pub fn new(path: impl Into<String>, authenticated: bool, count: i64, liked: bool) -> Self {
        LikeButton {
            path: path.into(),
            authenticated,
            count,
            liked,
            busy: false,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Click handler: `begin_click`, the request, then `finish_click`.
    pub fn click(
        &mut self,
        backend: &dyn Backend,
        csrf_token: Option<&str>,
        toaster: &mut Toaster,
        now: Instant,
    ) -> LikeOutcome {
        let path = match self.begin_click(toaster, now) {
            Ok(p) => p,
            Err(outcome) => return outcome,
        };
        let result = backend.toggle_like(&path, csrf_token);
        self.finish_click(result, toaster, now)
    }

    /// Disable the button and hand back the path to POST to. A click while
    /// the button is disabled yields `Busy`.
    pub fn begin_click(&mut self, toaster: &mut Toaster, now: Instant) -> Result<String, LikeOutcome> {
        if !self.authenticated {
            toaster.show(Toast::info(LOGIN_REQUIRED), now);
            return Err(LikeOutcome::LoginRequired);
        }
        if self.busy {
            return Err(LikeOutcome::Busy);
        }
        self.busy = true;
        debug!("Like API URL: {}", self.path);
        Ok(self.path.clone())
    }

    /// Re-enable the button and apply the server's answer.
    pub fn finish_click(
        &mut self,
        result: Result<LikeResponse, FolioError>,
        toaster: &mut Toaster,
        now: Instant,
    ) -> LikeOutcome {
        self.busy = false;

        let data = match result {
            Ok(d) => d,
            Err(FolioError::Http { status, reason }) => {
                let msg = format!("Error: {} {}", status, reason);
                toaster.show(Toast::error(msg.clone()), now);
                return LikeOutcome::Failed(msg);
            }
            Err(e) if e.is_network() => {
                error!("Error liking post: {}", e);
                toaster.show(Toast::error(LIKE_NETWORK_ERROR), now);
                return LikeOutcome::Failed(e.to_string());
            }
            Err(e) => {
                error!("Like request not sent: {}", e);
                toaster.show(Toast::error(LIKE_FAILED), now);
                return LikeOutcome::Failed(e.to_string());
            }
        };

        if !data.success {
            let msg = data.message.filter(|m| !m.is_empty()).unwrap_or_else(|| LIKE_FAILED.to_string());
            toaster.show(Toast::error(msg), now);
            return LikeOutcome::Rejected;
        }

        self.count = data.likes_count;
        self.liked = data.has_liked;
        let toast = match (data.has_liked, data.message) {
            (true, Some(m)) if !m.is_empty() => Toast::success(m),
            (true, _) => Toast::success("Post liked!"),
            (false, Some(m)) if !m.is_empty() => Toast::info(m),
            (false, _) => Toast::info("Post unliked!"),
        };
        toaster.show(toast, now);
        LikeOutcome::Toggled { liked: self.liked, count: self.count }
    }

    pub fn render(&self) -> String {
        format!(
            "<button class=\"like-button{}\"{}><span class=\"like-count\">{}</span></button>",
            if self.liked { " liked" } else { "" },
            if self.busy { " disabled" } else { "" },
            html_escape(&self.count.to_string())
        )
    }
}
