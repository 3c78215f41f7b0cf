use log::debug;

use crate::models::project::{Project, PLACEHOLDER_IMAGE};
use crate::render::{display_attr, html_escape};

/// Project details dialog with its image gallery.
///
/// Every field shown (links included) comes from the one `current` project.
#[derive(Debug, Clone, Default)]
pub struct ProjectModal {
    current: Option<Project>,
    image_index: usize,
    open: bool,
}

impl ProjectModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the project with `id`. Unknown ids leave the modal as it was.
    pub fn open(&mut self, projects: &[Project], id: i64) -> bool {
        let project = match projects.iter().find(|p| p.id == id) {
            Some(p) => p.clone(),
            None => {
                debug!("No project with id {}", id);
                return false;
            }
        };
        self.current = Some(project);
        self.image_index = 0;
        self.open = true;
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Escape key. Returns whether it closed the modal.
    pub fn escape(&mut self) -> bool {
        if self.open {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Page scrolling is locked while the modal shows.
    pub fn body_locked(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    fn image_count(&self) -> usize {
        self.current.as_ref().map_or(0, |p| p.images.len())
    }

    pub fn next(&mut self) {
        let n = self.image_count();
        if self.open && n > 0 {
            self.image_index = (self.image_index + 1) % n;
        }
    }

    pub fn prev(&mut self) {
        let n = self.image_count();
        if self.open && n > 0 {
            self.image_index = (self.image_index + n - 1) % n;
        }
    }

    /// Thumbnail click.
    pub fn select(&mut self, index: usize) {
        if self.open && index < self.image_count() {
            self.image_index = index;
        }
    }

    /// Prev/next arrows only make sense with more than one image.
    pub fn nav_visible(&self) -> bool {
        self.image_count() > 1
    }

    /// The large image: the selected gallery image, or the main image, or
    /// the placeholder when the gallery is empty.
    pub fn main_image(&self) -> &str {
        match self.current {
            Some(ref p) => match p.images.get(self.image_index) {
                Some(img) => img.as_str(),
                None => p.main_image_url.as_deref().filter(|u| !u.is_empty()).unwrap_or(PLACEHOLDER_IMAGE),
            },
            None => PLACEHOLDER_IMAGE,
        }
    }

    pub fn render(&self) -> String {
        let p = match self.current {
            Some(ref p) => p,
            None => return "<div class=\"project-modal\"></div>".to_string(),
        };
        let active = if self.open { " active" } else { "" };

        let thumbs: String = p
            .images
            .iter()
            .enumerate()
            .map(|(i, img)| {
                format!(
                    "<div class=\"thumbnail-item{}\"><img src=\"{}\" alt=\"Thumbnail {}\"></div>",
                    if i == self.image_index { " active" } else { "" },
                    html_escape(img),
                    i + 1
                )
            })
            .collect();
        let tags: String = p
            .technologies
            .iter()
            .map(|t| format!("<span class=\"modal-tech-tag\">{}</span>", html_escape(t)))
            .collect();
        let features: String = p
            .key_features
            .iter()
            .flatten()
            .map(|f| format!("<li>{}</li>", html_escape(f.trim())))
            .collect();
        let nav = display_attr(self.nav_visible(), "flex");

        // description and challenges are rich text from the site, inserted as-is
        format!(
            "<div class=\"project-modal{active}\"><div class=\"modal-overlay\"></div><div class=\"modal-container\">\
<button class=\"modal-close-btn\">&times;</button>\
<div class=\"modal-gallery\"><img class=\"modal-image\" src=\"{image}\" alt=\"{title}\">\
<div class=\"modal-image-nav\"><button class=\"prev-btn\"{nav}>&lsaquo;</button><button class=\"next-btn\"{nav}>&rsaquo;</button></div>\
<div class=\"modal-thumbnails\"{thumbs_display}>{thumbs}</div></div>\
<div class=\"modal-details\">\
<h2 class=\"modal-title\">{title}</h2>\
<div class=\"modal-meta\"><span class=\"modal-date\">{date}</span><span class=\"modal-category\">{category}</span></div>\
<div class=\"modal-description\">{description}</div>\
<div class=\"modal-links\">{live}{code}</div>\
<div class=\"modal-tech\"><div class=\"tech-tags\">{tags}</div></div>\
<ul class=\"features-list\">{features}</ul>\
<div class=\"challenges-content\">{challenges}</div>\
</div></div></div>",
            active = active,
            image = html_escape(self.main_image()),
            title = html_escape(&p.title),
            nav = nav,
            thumbs_display = display_attr(!p.images.is_empty(), "flex"),
            thumbs = thumbs,
            date = html_escape(p.date.as_deref().unwrap_or("")),
            category = html_escape(&p.category),
            description = p.full_description(),
            live = modal_link("live-link", p.live_link(), "Live Demo"),
            code = modal_link("code-link", p.code_link(), "View Code"),
            tags = tags,
            features = features,
            challenges = p.challenges_and_solutions.as_deref().unwrap_or(""),
        )
    }
}

fn modal_link(class: &str, href: Option<&str>, label: &str) -> String {
    format!(
        "<a class=\"modal-link {}\" href=\"{}\" target=\"_blank\"{}>{}</a>",
        class,
        html_escape(href.unwrap_or("#")),
        display_attr(href.is_some(), "inline-flex"),
        label
    )
}
