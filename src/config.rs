use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::csrf;
use crate::error::FolioError;

/// The signed-in visitor, if any. Decided once per page load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

/// Everything a page component needs to know about the page it runs on.
///
/// Loaded from a TOML file for the CLI, or built from the JSON object of
/// globals the blog template injects (`USER_IS_AUTHENTICATED`, `POST_SLUG`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub comment_action: Option<String>,
    #[serde(default)]
    pub contact_action: Option<String>,
    #[serde(default)]
    pub post_slug: Option<String>,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// Raw `Cookie` header, used as the CSRF fallback source.
    #[serde(default)]
    pub cookie: Option<String>,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub session: Session,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            base_url: default_base_url(),
            comment_action: None,
            contact_action: None,
            post_slug: None,
            post_id: None,
            csrf_token: None,
            cookie: None,
            timeout_secs: None,
            session: Session::default(),
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, FolioError> {
        let cfg: PageConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, FolioError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Build a config from the page globals object.
    /// `USER_IS_AUTHENTICATED` arrives as the string `"true"` from the template.
    pub fn from_globals(globals: &Value) -> Result<Self, FolioError> {
        let gs = |key: &str| -> Option<String> {
            match globals.get(key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(Value::Bool(b)) => Some(b.to_string()),
                _ => None,
            }
        };

        let post_id = match gs("POST_ID") {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                FolioError::Config(format!("POST_ID is not a number: {}", raw))
            })?),
            None => None,
        };

        let cfg = PageConfig {
            base_url: gs("BASE_URL").unwrap_or_else(default_base_url),
            comment_action: gs("COMMENT_ACTION"),
            contact_action: gs("CONTACT_ACTION"),
            post_slug: gs("POST_SLUG"),
            post_id,
            csrf_token: gs("CSRF_TOKEN"),
            cookie: gs("COOKIE"),
            timeout_secs: None,
            session: Session {
                authenticated: gs("USER_IS_AUTHENTICATED").as_deref() == Some("true"),
                full_name: gs("USER_FULL_NAME").unwrap_or_default(),
                email: gs("USER_EMAIL").unwrap_or_default(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), FolioError> {
        url::Url::parse(&self.base_url)?;
        if let Some(ref slug) = self.post_slug {
            if slug.contains('/') {
                return Err(FolioError::Config(format!("post_slug must not contain '/': {}", slug)));
            }
        }
        Ok(())
    }

    pub fn csrf(&self) -> Option<String> {
        csrf::resolve(self.csrf_token.as_deref(), self.cookie.as_deref())
    }

    /// Explicit comment form action, else `/blog/<slug>/comment/`.
    pub fn comment_action(&self) -> Option<String> {
        self.comment_action
            .clone()
            .or_else(|| self.post_slug.as_ref().map(|s| format!("/blog/{}/comment/", s)))
    }

    pub fn like_path(&self) -> Option<String> {
        self.post_slug.as_ref().map(|s| format!("/blog/{}/like/", s))
    }

    pub fn contact_action(&self) -> String {
        self.contact_action.clone().unwrap_or_else(|| "/contact/".to_string())
    }
}
