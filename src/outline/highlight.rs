use std::collections::HashSet;

/// Minimum visible share of a heading for it to take the highlight.
pub const ACTIVE_RATIO: f64 = 0.5;

/// One intersection report for a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Viewport-relative box of a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingBox {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl HeadingBox {
    fn overlaps(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// Keeps at most one outline entry active.
#[derive(Debug, Clone, Default)]
pub struct ActiveTracker {
    linked: HashSet<String>,
    active: Option<String>,
}

impl ActiveTracker {
    /// `linked` are the heading ids that have an outline link.
    pub fn new<I, S>(linked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActiveTracker {
            linked: linked.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply one batch of observations. `headings` are all heading boxes in
    /// document order, used when nothing in the batch is visible enough.
    pub fn observe(
        &mut self,
        batch: &[Observation],
        headings: &[HeadingBox],
        viewport_height: f64,
    ) -> Option<&str> {
        let mut found = false;
        for obs in batch {
            if obs.is_intersecting && obs.ratio >= ACTIVE_RATIO && self.linked.contains(&obs.id) {
                self.active = Some(obs.id.clone());
                found = true;
            }
        }

        if !found {
            // only the first overlapping heading counts, linked or not
            if let Some(first) = headings.iter().find(|h| h.overlaps(viewport_height)) {
                if self.linked.contains(&first.id) {
                    self.active = Some(first.id.clone());
                }
            }
        }

        self.active()
    }
}

/// Scroll position for the outline container that centers the active link.
pub fn centered_scroll_offset(
    link_top: f64,
    container_top: f64,
    container_height: f64,
    link_height: f64,
) -> f64 {
    link_top - container_top - container_height / 2.0 + link_height / 2.0
}
