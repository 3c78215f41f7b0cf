use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400/cccccc/333333?text=No+Image";

/// A portfolio project as served by `GET /api/projects/`.
///
/// The API and the older page script disagree on a few field names
/// (`liveUrl` / `live_url`, `features` / `key_features`,
/// `challenges` / `challenges_and_solutions`); both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub main_image_url: Option<String>,
    #[serde(default, alias = "liveUrl")]
    pub live_url: Option<String>,
    #[serde(default, rename = "codeUrl", alias = "code_url")]
    pub code_url: Option<String>,
    #[serde(default, alias = "features")]
    pub key_features: Option<Vec<String>>,
    #[serde(default, alias = "challenges")]
    pub challenges_and_solutions: Option<String>,
}

fn default_category() -> String {
    "other".to_string()
}

fn category_or_default<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|c| !c.is_empty()).unwrap_or_else(default_category))
}

impl Project {
    pub fn full_description(&self) -> &str {
        self.full_description.as_deref().unwrap_or("")
    }

    /// Card image: first gallery image, then the main image, then the placeholder.
    pub fn card_image(&self) -> &str {
        self.images
            .first()
            .map(|s| s.as_str())
            .or(self.main_image_url.as_deref().filter(|u| !u.is_empty()))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn live_link(&self) -> Option<&str> {
        self.live_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn code_link(&self) -> Option<&str> {
        self.code_url.as_deref().filter(|u| !u.is_empty())
    }

    /// Technologies joined for the card's `data-tech` attribute.
    pub fn tech_key(&self) -> String {
        self.technologies.join(", ").to_lowercase()
    }

    /// Case-insensitive substring match over title, descriptions and technologies.
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.full_description().to_lowercase().contains(needle)
            || self.technologies.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_spelling_is_accepted() {
        let p: Project = serde_json::from_str(
            r#"{
                "id": 3, "title": "Folio", "description": "Site",
                "full_description": null, "category": "fullstack",
                "date": "March 2024", "technologies": ["Rust", "Django"],
                "main_image_url": "/media/p.png", "images": [],
                "liveUrl": "https://folio.dev", "codeUrl": null,
                "features": ["Fast", "Small"], "challenges": ""
            }"#,
        )
        .unwrap();
        assert_eq!(p.live_link(), Some("https://folio.dev"));
        assert_eq!(p.code_link(), None);
        assert_eq!(p.key_features.as_deref(), Some(&["Fast".to_string(), "Small".to_string()][..]));
        assert_eq!(p.full_description(), "");
        assert_eq!(p.card_image(), "/media/p.png");
        assert_eq!(p.tech_key(), "rust, django");
    }

    #[test]
    fn missing_category_is_other() {
        let p: Project = serde_json::from_str(r#"{"id": 1, "title": "t", "category": null}"#).unwrap();
        assert_eq!(p.category, "other");
        let p: Project = serde_json::from_str(r#"{"id": 1, "title": "t"}"#).unwrap();
        assert_eq!(p.category, "other");
        assert_eq!(p.card_image(), PLACEHOLDER_IMAGE);
    }
}
