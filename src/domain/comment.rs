use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parent id carried by top-level comments.
pub const ROOT_PARENT_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub parent_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: i64, post_id: i64, user_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id,
            parent_id: ROOT_PARENT_ID,
            user_id,
            text: String::new(),
            image: None,
            created_at,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id != ROOT_PARENT_ID
    }

    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|image| !image.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parent_is_root() {
        let json = r#"{"id": 1, "post_id": 2, "user_id": 3, "created_at": "2024-01-01T00:00:00Z"}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert!(!comment.is_reply());
        assert!(!comment.has_image());
    }

    #[test]
    fn test_reply_with_image() {
        let mut comment = Comment::new(5, 2, 3, Utc::now());
        comment.parent_id = 1;
        comment.image = Some("pic.jpg".into());
        assert!(comment.is_reply());
        assert!(comment.has_image());

        comment.image = Some(String::new());
        assert!(!comment.has_image());
    }
}
