use serde::{Deserialize, Serialize};

use super::FieldErrors;

pub type CommentId = i64;

pub const DEFAULT_AVATAR_URL: &str = "/static/images/default_user_avatar.jpg";

/// A comment as the server returns it after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
    pub author: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    pub content: String,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn avatar(&self) -> &str {
        match self.avatar_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR_URL,
        }
    }
}

/// Body of the comment endpoint, for both the 200 and the 400 case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Fields of a comment or reply form as the visitor filled them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentDraft {
    pub content: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_success_body() {
        let body = r#"{
            "success": true,
            "comment": {"id": 5, "author": "Ada", "content": "Hi\nthere",
                        "created_at": "Jan 02, 2025, 10:00 AM",
                        "avatar_url": "/static/images/default_comment_avatar.jpg",
                        "parent_id": null},
            "message": "Comment posted successfully!"
        }"#;
        let resp: CommentResponse = serde_json::from_str(body).unwrap();
        let c = resp.comment.unwrap();
        assert!(resp.success);
        assert_eq!(c.id, 5);
        assert!(!c.is_reply());
        assert_eq!(c.avatar(), "/static/images/default_comment_avatar.jpg");
    }

    #[test]
    fn decode_error_body() {
        let body = r#"{"success": false, "errors": {"parent": ["Invalid parent comment."]}}"#;
        let resp: CommentResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.success);
        assert!(resp.comment.is_none());
        assert_eq!(resp.errors.unwrap()["parent"], vec!["Invalid parent comment."]);
    }

    #[test]
    fn missing_avatar_uses_default() {
        let c = Comment {
            id: 1,
            parent_id: Some(0),
            author: "a".into(),
            avatar_url: Some(String::new()),
            created_at: String::new(),
            content: String::new(),
        };
        assert_eq!(c.avatar(), DEFAULT_AVATAR_URL);
        assert!(c.is_reply());
    }
}
