//! Portfolio page: project grid with category filter and search, plus the
//! details modal.

pub mod gallery;
pub mod modal;

pub use gallery::{Gallery, LoadState, FILTER_ALL};
pub use modal::ProjectModal;

use crate::client::Backend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEvent {
    Filter(String),
    Search(String),
    /// Card or "View Details" click.
    Open(i64),
    Close,
    PrevImage,
    NextImage,
    Thumbnail(usize),
    Escape,
}

#[derive(Debug, Default)]
pub struct ProjectsPage {
    gallery: Gallery,
    modal: ProjectModal,
}

impl ProjectsPage {
    /// Build the page and fetch the projects.
    pub fn load(backend: &dyn Backend) -> Self {
        let mut page = ProjectsPage::default();
        page.gallery.load(backend);
        page
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn modal(&self) -> &ProjectModal {
        &self.modal
    }

    pub fn handle(&mut self, event: ProjectEvent) {
        match event {
            ProjectEvent::Filter(f) => self.gallery.set_filter(&f),
            ProjectEvent::Search(s) => self.gallery.set_search(&s),
            ProjectEvent::Open(id) => {
                self.modal.open(self.gallery.projects(), id);
            }
            ProjectEvent::Close => self.modal.close(),
            ProjectEvent::PrevImage => self.modal.prev(),
            ProjectEvent::NextImage => self.modal.next(),
            ProjectEvent::Thumbnail(i) => self.modal.select(i),
            ProjectEvent::Escape => {
                self.modal.escape();
            }
        }
    }

    /// Inline `overflow` for `<body>`.
    pub fn body_overflow(&self) -> &'static str {
        if self.modal.body_locked() {
            "hidden"
        } else {
            ""
        }
    }
}
