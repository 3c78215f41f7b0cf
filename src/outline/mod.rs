//! Table of contents for a post: heading scan, nested outline and the
//! scroll-driven highlight of the current section.

pub mod anchor;
pub mod builder;
pub mod highlight;
pub mod scan;

use log::{debug, info};

pub use builder::{build, OutlineItem, OutlineList, OutlineNode};
pub use highlight::{centered_scroll_offset, ActiveTracker, HeadingBox, Observation};
pub use scan::Heading;

/// Outline of one post together with its id-annotated content.
#[derive(Debug, Clone)]
pub struct TableOfContents {
    content: String,
    headings: Vec<Heading>,
    outline: OutlineList,
    tracker: ActiveTracker,
}

impl TableOfContents {
    /// Scan the post body. `None` when it has no h2–h4 headings, in which
    /// case the page hides the TOC sidebar.
    pub fn generate(content_html: &str) -> Option<Self> {
        let (content, headings) = scan::annotate(content_html);
        if headings.is_empty() {
            info!("No headings (h2-h4) found in post content. TOC will not be generated.");
            return None;
        }
        let outline = build(&headings);
        let tracker = ActiveTracker::new(headings.iter().map(|h| h.id.clone()));
        debug!("TOC generated with {} entries", headings.len());
        Some(TableOfContents { content, headings, outline, tracker })
    }

    /// The post body with generated ids on its headings.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn outline(&self) -> &OutlineList {
        &self.outline
    }

    pub fn active(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn observe(
        &mut self,
        batch: &[Observation],
        boxes: &[HeadingBox],
        viewport_height: f64,
    ) -> Option<&str> {
        self.tracker.observe(batch, boxes, viewport_height)
    }

    /// Inner HTML of `#toc-nav` with the current entry marked.
    pub fn render(&self) -> String {
        self.outline.render(self.tracker.active())
    }
}
