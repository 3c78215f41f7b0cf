//! Copy buttons on the `<pre>` code blocks of a post body.

use log::{debug, error, warn};
use regex::{Captures, Regex};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::error::FolioError;
use crate::outline::scan::text_content;
use crate::toast::{Toast, Toaster};

/// How long the button shows its "copied" state.
pub const COPIED_FOR: Duration = Duration::from_millis(2000);

pub const COPIED_TOAST: &str = "Code copied to clipboard!";
pub const COPY_FAILED: &str = "Failed to copy code. Please copy manually.";

const TITLE_IDLE: &str = "Copy code";
const TITLE_COPIED: &str = "Copied!";
const ICON_IDLE: &str = "<i class=\"far fa-copy\"></i>";
const ICON_COPIED: &str = "<i class=\"fas fa-check\"></i>";

/// A way of putting text on the clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), FolioError>;
}

fn pre_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<pre(\s[^>]*)?>(.*?)</pre\s*>").expect("valid regex"))
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<code(?:\s[^>]*)?>(.*?)</code\s*>").expect("valid regex"))
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)\sstyle\s*=\s*"([^"]*)""#).expect("valid regex"))
}

fn has_copy_button(inner: &str) -> bool {
    inner.contains("class=\"copy-code\"") || inner.contains("class='copy-code'")
}

/// One code block that received a copy button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Text of the block's `<code>` element, if it has one.
    pub code: Option<String>,
    copied_at: Option<Instant>,
}

impl CodeBlock {
    pub fn new(code: Option<String>) -> Self {
        CodeBlock { code, copied_at: None }
    }

    /// Click handler. Clipboards are tried in order until one accepts the
    /// text; the second is the fallback for when the first is missing or
    /// refuses.
    pub fn copy(&mut self, clipboards: &mut [&mut dyn Clipboard], toaster: &mut Toaster, now: Instant) -> bool {
        let code = match self.code {
            Some(ref c) => c,
            None => {
                warn!("Code block has no <code> element; nothing to copy");
                return false;
            }
        };
        for clipboard in clipboards.iter_mut() {
            match clipboard.write_text(code) {
                Ok(()) => {
                    self.copied_at = Some(now);
                    toaster.show(Toast::success(COPIED_TOAST), now);
                    return true;
                }
                Err(e) => error!("Failed to copy text: {}", e),
            }
        }
        toaster.show(Toast::error(COPY_FAILED), now);
        false
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        matches!(self.copied_at, Some(at) if now.saturating_duration_since(at) < COPIED_FOR)
    }

    pub fn title(&self, now: Instant) -> &'static str {
        if self.is_copied(now) {
            TITLE_COPIED
        } else {
            TITLE_IDLE
        }
    }

    pub fn render_button(&self, now: Instant) -> String {
        let icon = if self.is_copied(now) { ICON_COPIED } else { ICON_IDLE };
        format!("<button class=\"copy-code\" title=\"{}\">{}</button>", self.title(now), icon)
    }
}

/// Put a copy button at the start of every `<pre>` that lacks one and make
/// the block `position: relative`. Returns the rewritten HTML and the
/// blocks that got a button, in document order.
pub fn add_copy_buttons(content_html: &str) -> (String, Vec<CodeBlock>) {
    let mut blocks = Vec::new();
    let rewritten = pre_re().replace_all(content_html, |caps: &Captures| {
        let inner = &caps[2];
        if has_copy_button(inner) {
            return caps[0].to_string();
        }
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let attrs = if style_re().is_match(attrs) {
            style_re()
                .replace(attrs, |s: &Captures| format!(" style=\"position: relative; {}\"", &s[1]))
                .into_owned()
        } else {
            format!("{} style=\"position: relative;\"", attrs)
        };
        let block = CodeBlock::new(code_re().captures(inner).map(|c| text_content(&c[1])));
        let tag = format!("<pre{}>{}{}</pre>", attrs, block.render_button(Instant::now()), inner);
        blocks.push(block);
        tag
    });
    debug!("Added copy buttons to {} code blocks", blocks.len());
    (rewritten.into_owned(), blocks)
}
