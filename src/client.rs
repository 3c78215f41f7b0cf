use log::{debug, warn};
use std::time::Duration;
use url::Url;

use crate::config::PageConfig;
use crate::error::FolioError;
use crate::models::comment::CommentResponse;
use crate::models::contact::ContactResponse;
use crate::models::like::LikeResponse;
use crate::models::project::Project;

pub const PROJECTS_PATH: &str = "/api/projects/";

/// A form-encoded POST to one of the site's endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRequest {
    pub action: String,
    pub fields: Vec<(String, String)>,
    pub csrf_token: Option<String>,
}

impl FormRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The site's HTTP surface. Page components only ever talk to this trait,
/// so tests can swap in a scripted backend.
pub trait Backend {
    /// The comment endpoint answers 400 with a JSON error body, so the body
    /// is decoded whatever the status.
    fn post_comment(&self, req: &FormRequest) -> Result<CommentResponse, FolioError>;

    /// Non-2xx answers are `FolioError::Http`.
    fn toggle_like(&self, path: &str, csrf_token: Option<&str>) -> Result<LikeResponse, FolioError>;

    fn fetch_projects(&self) -> Result<Vec<Project>, FolioError>;

    /// Non-2xx answers are `FolioError::Http`.
    fn post_contact(&self, req: &FormRequest) -> Result<ContactResponse, FolioError>;
}

/// `Backend` over real HTTP.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(config: &PageConfig) -> Result<Self, FolioError> {
        let mut builder = reqwest::blocking::Client::builder();
        // reqwest's blocking client defaults to 30s; the site expects no limit unless configured.
        builder = match config.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.timeout(None::<Duration>),
        };
        let client = builder.build()?;
        let base = Url::parse(&config.base_url)?;
        Ok(HttpBackend { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, FolioError> {
        Ok(self.base.join(path)?)
    }

    fn post_form(&self, req: &FormRequest) -> Result<reqwest::blocking::Response, FolioError> {
        let url = self.url(&req.action)?;
        debug!("POST {} ({} fields)", url, req.fields.len());
        let mut builder = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&req.fields);
        if let Some(ref token) = req.csrf_token {
            builder = builder.header("X-CSRFToken", token);
        }
        Ok(builder.send()?)
    }
}

fn http_error(resp: reqwest::blocking::Response) -> FolioError {
    let status = resp.status();
    let reason = status.canonical_reason().unwrap_or("").to_string();
    let text = resp.text().unwrap_or_default();
    warn!("HTTP error {} {}: {}", status.as_u16(), reason, text);
    FolioError::Http { status: status.as_u16(), reason }
}

impl Backend for HttpBackend {
    fn post_comment(&self, req: &FormRequest) -> Result<CommentResponse, FolioError> {
        let resp = self.post_form(req)?;
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn toggle_like(&self, path: &str, csrf_token: Option<&str>) -> Result<LikeResponse, FolioError> {
        let url = self.url(path)?;
        debug!("Like API URL: {}", url);
        let mut builder = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = csrf_token {
            builder = builder.header("X-CSRFToken", token);
        }
        let resp = builder.send()?;
        if !resp.status().is_success() {
            return Err(http_error(resp));
        }
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn fetch_projects(&self) -> Result<Vec<Project>, FolioError> {
        let url = self.url(PROJECTS_PATH)?;
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(http_error(resp));
        }
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    fn post_contact(&self, req: &FormRequest) -> Result<ContactResponse, FolioError> {
        let resp = self.post_form(req)?;
        if !resp.status().is_success() {
            return Err(http_error(resp));
        }
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}
