//! Scroll-driven page chrome: reading progress, back-to-top, navbar state,
//! anchor scroll targets and the mobile menu.

use log::debug;

/// Back-to-top shows once the page is scrolled past this many pixels.
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;
/// Hero height assumed when the page has no hero section.
pub const DEFAULT_HERO_HEIGHT: f64 = 100.0;
/// Viewport widths above this use the desktop navigation.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Gap kept between the fixed header and an article heading scrolled to.
pub const ANCHOR_GAP: f64 = 20.0;

/// Geometry of the window at one scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
    pub doc_height: f64,
}

/// Width of the reading progress bar in percent. Zero when the document
/// fits in the viewport.
pub fn reading_progress(v: Viewport) -> f64 {
    if v.doc_height <= v.height {
        return 0.0;
    }
    (v.scroll_y / (v.doc_height - v.height) * 100.0).clamp(0.0, 100.0)
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

/// Navbar takes its `scrolled` look past half the hero.
pub fn navbar_scrolled(scroll_y: f64, hero_height: Option<f64>) -> bool {
    scroll_y > hero_height.unwrap_or(DEFAULT_HERO_HEIGHT) / 2.0
}

/// Scroll target for a TOC or in-article link: the heading's document
/// offset minus the fixed header and a small gap.
pub fn article_anchor_target(target_top: f64, header_height: f64) -> f64 {
    target_top - header_height - ANCHOR_GAP
}

/// Scroll target for site navigation links: just below the navbar.
pub fn nav_anchor_target(target_top: f64, navbar_height: f64) -> f64 {
    target_top - navbar_height
}

/// Whether an in-page link gets smooth scrolling. Bare `#` and the CV
/// download button keep their default behavior.
pub fn handles_anchor(href: &str, is_cv_button: bool) -> bool {
    href.starts_with('#') && href != "#" && !is_cv_button
}

/// Hamburger menu on small screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    active: bool,
}

impl MobileMenu {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        debug!("mobile menu {}", if self.active { "opened" } else { "closed" });
        self.active
    }

    /// A link inside the menu was followed.
    pub fn link_clicked(&mut self) {
        self.active = false;
    }

    pub fn resized(&mut self, width: f64) {
        if width > MOBILE_BREAKPOINT && self.active {
            self.active = false;
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.active {
            "true"
        } else {
            "false"
        }
    }

    /// The body stops scrolling while the menu covers it.
    pub fn body_class(&self) -> &'static str {
        if self.active {
            "overflow-hidden"
        } else {
            ""
        }
    }

    pub fn render_hamburger(&self) -> String {
        format!(
            "<button class=\"hamburger{}\" aria-expanded=\"{}\" aria-label=\"Menu\"><span></span><span></span><span></span></button>",
            if self.active { " active" } else { "" },
            self.aria_expanded()
        )
    }
}

/// Chrome state recomputed on every scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub progress: f64,
    pub back_to_top: bool,
    pub navbar_scrolled: bool,
}

impl ScrollState {
    pub fn at(v: Viewport, hero_height: Option<f64>) -> Self {
        ScrollState {
            progress: reading_progress(v),
            back_to_top: back_to_top_visible(v.scroll_y),
            navbar_scrolled: navbar_scrolled(v.scroll_y, hero_height),
        }
    }

    pub fn render_progress_bar(&self) -> String {
        format!("<div id=\"progress-bar\" style=\"width: {}%;\"></div>", self.progress)
    }

    pub fn render_back_to_top(&self) -> String {
        format!(
            "<a href=\"#\" class=\"back-to-top{}\" aria-label=\"Back to top\"></a>",
            if self.back_to_top { " visible" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_share_of_scrollable_height() {
        let v = Viewport { scroll_y: 500.0, height: 1000.0, doc_height: 3000.0 };
        assert_eq!(reading_progress(v), 25.0);
        let end = Viewport { scroll_y: 2000.0, ..v };
        assert_eq!(reading_progress(end), 100.0);
    }

    #[test]
    fn short_document_has_no_progress() {
        let v = Viewport { scroll_y: 0.0, height: 900.0, doc_height: 900.0 };
        assert_eq!(reading_progress(v), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        let v = Viewport { scroll_y: 2300.0, height: 1000.0, doc_height: 3000.0 };
        assert_eq!(reading_progress(v), 100.0);
        let v = Viewport { scroll_y: -40.0, ..v };
        assert_eq!(reading_progress(v), 0.0);
    }

    #[test]
    fn thresholds() {
        assert!(!back_to_top_visible(300.0));
        assert!(back_to_top_visible(301.0));
        assert!(navbar_scrolled(51.0, None));
        assert!(!navbar_scrolled(50.0, None));
        assert!(!navbar_scrolled(200.0, Some(600.0)));
    }

    #[test]
    fn anchor_targets() {
        assert_eq!(article_anchor_target(1200.0, 80.0), 1100.0);
        assert_eq!(nav_anchor_target(1200.0, 80.0), 1120.0);
        assert!(handles_anchor("#about", false));
        assert!(!handles_anchor("#", false));
        assert!(!handles_anchor("#cv", true));
        assert!(!handles_anchor("/about/", false));
    }

    #[test]
    fn menu_closes_on_link_and_wide_resize() {
        let mut menu = MobileMenu::default();
        assert!(menu.toggle());
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.body_class(), "overflow-hidden");
        menu.resized(700.0);
        assert!(menu.is_active());
        menu.resized(1024.0);
        assert!(!menu.is_active());

        menu.toggle();
        menu.link_clicked();
        assert!(!menu.is_active());
        assert!(menu.render_hamburger().contains("aria-expanded=\"false\""));
    }

    #[test]
    fn scroll_state_renders() {
        let s = ScrollState::at(Viewport { scroll_y: 400.0, height: 800.0, doc_height: 1600.0 }, Some(500.0));
        assert!(s.back_to_top && s.navbar_scrolled);
        assert_eq!(s.render_progress_bar(), "<div id=\"progress-bar\" style=\"width: 50%;\"></div>");
        assert!(s.render_back_to_top().contains("back-to-top visible"));
    }
}
