use log::{error, info};

use crate::client::Backend;
use crate::error::FolioError;
use crate::models::project::Project;
use crate::render::{display_attr, html_escape};

pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(Vec<Project>),
    Failed(String),
}

/// The projects grid: everything fetched once, then filtered client-side.
#[derive(Debug, Clone)]
pub struct Gallery {
    state: LoadState,
    filter: String,
    search: String,
}

impl Default for Gallery {
    fn default() -> Self {
        Gallery {
            state: LoadState::Loading,
            filter: FILTER_ALL.to_string(),
            search: String::new(),
        }
    }
}

fn load_error_text(e: &FolioError) -> String {
    match e {
        FolioError::Http { status, .. } => format!("HTTP error! status: {}", status),
        other => other.to_string(),
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, backend: &dyn Backend) -> &LoadState {
        self.state = match backend.fetch_projects() {
            Ok(projects) => {
                info!("Loaded {} projects", projects.len());
                LoadState::Loaded(projects)
            }
            Err(e) => {
                error!("Error fetching projects: {}", e);
                LoadState::Failed(load_error_text(&e))
            }
        };
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// All fetched projects; empty until loaded.
    pub fn projects(&self) -> &[Project] {
        match self.state {
            LoadState::Loaded(ref p) => p.as_slice(),
            _ => &[],
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Filter button: `all` or a category name.
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    /// Search box input; surrounding whitespace is ignored.
    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_string();
    }

    pub fn visible(&self) -> Vec<&Project> {
        let needle = self.search.to_lowercase();
        self.projects()
            .iter()
            .filter(|p| self.filter == FILTER_ALL || p.category == self.filter)
            .filter(|p| needle.is_empty() || p.matches(&needle))
            .collect()
    }

    /// Inner HTML of `.projects-grid` for the current state.
    pub fn render(&self) -> String {
        match self.state {
            LoadState::Loading => "<div class=\"project-loading\"><div class=\"loading-spinner\"></div><p>Loading projects...</p></div>".to_string(),
            LoadState::Failed(ref msg) => format!(
                "<div class=\"no-projects error-state\"><i class=\"fas fa-exclamation-circle\"></i>\
<h3>Failed to load projects</h3><p>Please try again later. Error: {}</p></div>",
                html_escape(msg)
            ),
            LoadState::Loaded(_) => {
                let visible = self.visible();
                if visible.is_empty() {
                    return "<div class=\"no-projects\"><i class=\"fas fa-folder-open\"></i>\
<h3>No projects found</h3><p>Try adjusting your filters or search term.</p></div>"
                        .to_string();
                }
                let mut html = String::from("<div class=\"projects-grid-container\">");
                for (i, p) in visible.iter().enumerate() {
                    html.push_str(&render_card(p, i));
                }
                html.push_str("</div>");
                html
            }
        }
    }
}

fn link(class: &str, href: Option<&str>, label: &str) -> String {
    format!(
        "<a class=\"project-link {}\" href=\"{}\" target=\"_blank\"{}>{}</a>",
        class,
        html_escape(href.unwrap_or("#")),
        display_attr(href.is_some(), "inline-flex"),
        label
    )
}

/// One card. `index` staggers the entrance animation by 0.1s per card.
pub fn render_card(p: &Project, index: usize) -> String {
    let tags: String = p
        .technologies
        .iter()
        .map(|t| format!("<span class=\"tech-tag\">{}</span>", html_escape(t)))
        .collect();
    format!(
        "<div class=\"project-card\" data-id=\"{id}\" data-category=\"{category}\" data-tech=\"{tech}\" style=\"animation-delay: {delay:.1}s;\">\
<div class=\"project-image\" style=\"background-image: url('{image}'); background-size: cover; background-position: center;\"></div>\
<div class=\"project-content\">\
<h3 class=\"project-title\">{title}</h3>\
<p class=\"project-description\">{description}</p>\
<div class=\"project-tech\">{tags}</div>\
<div class=\"project-links\">{live}{code}</div>\
<button class=\"view-details-btn\" data-id=\"{id}\">View Details</button>\
</div></div>",
        id = p.id,
        category = html_escape(&p.category),
        tech = html_escape(&p.tech_key()),
        delay = index as f64 * 0.1,
        image = html_escape(p.card_image()),
        title = html_escape(&p.title),
        description = html_escape(&p.description),
        tags = tags,
        live = link("live-link", p.live_link(), "Live Demo"),
        code = link("code-link", p.code_link(), "Source Code"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::PLACEHOLDER_IMAGE;

    fn project(id: i64, title: &str, category: &str, tech: &[&str]) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": format!("{} description", title),
            "category": category,
            "technologies": tech,
        }))
        .unwrap()
    }

    fn loaded(projects: Vec<Project>) -> Gallery {
        Gallery { state: LoadState::Loaded(projects), ..Gallery::default() }
    }

    #[test]
    fn filter_and_search_combine() {
        let mut g = loaded(vec![
            project(1, "Blog engine", "web", &["Rust", "Rocket"]),
            project(2, "Chess bot", "ai", &["Python"]),
            project(3, "Portfolio", "web", &["Django"]),
        ]);
        assert_eq!(g.visible().len(), 3);

        g.set_filter("web");
        assert_eq!(g.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

        g.set_search("  ROCKET ");
        assert_eq!(g.search(), "ROCKET");
        assert_eq!(g.visible().iter().map(|p| p.id).collect::<Vec<_>>(), vec![1]);

        g.set_filter("ai");
        assert!(g.visible().is_empty());
        assert!(g.render().contains("No projects found"));
    }

    #[test]
    fn card_hides_missing_links_and_uses_placeholder() {
        let p = project(7, "Tool", "cli", &["Rust", "Clap"]);
        let html = render_card(&p, 3);
        assert!(html.contains("data-tech=\"rust, clap\""));
        assert!(html.contains(PLACEHOLDER_IMAGE));
        assert!(html.contains("animation-delay: 0.3s;"));
        assert_eq!(html.matches("style=\"display: none;\"").count(), 2);
    }

    #[test]
    fn load_failure_shows_status() {
        let mut g = Gallery::new();
        g.state = LoadState::Failed(load_error_text(&FolioError::Http { status: 502, reason: "Bad Gateway".into() }));
        let html = g.render();
        assert!(html.contains("<h3>Failed to load projects</h3>"));
        assert!(html.contains("Error: HTTP error! status: 502</p>"));
        assert!(g.projects().is_empty());
    }

    #[test]
    fn starts_loading() {
        assert_eq!(Gallery::new().state(), &LoadState::Loading);
        assert!(Gallery::new().render().contains("Loading projects..."));
    }
}
