use serde::{Deserialize, Serialize};

/// Body of `POST /blog/<slug>/like/`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    #[serde(default)]
    pub likes_count: i64,
    #[serde(default)]
    pub has_liked: bool,
    #[serde(default)]
    pub message: Option<String>,
}
