use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Posts carry at most this many image references.
pub const MAX_POST_IMAGES: usize = 3;

/// Body text substituted when the content fetch fails.
pub const FAILED_CONTENT: &str = "content failed to load";

/// Post metadata as returned by listing and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub visible: bool,
}

impl PostMeta {
    pub fn new(id: i64, user_id: i64, category_id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            category_id,
            excerpt: String::new(),
            images: Vec::new(),
            created_at,
            visible: true,
        }
    }

    pub fn has_image(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Full post content, fetched separately from the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBody {
    pub post_id: i64,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
}

impl PostBody {
    pub fn new(post_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Placeholder body for a post whose content could not be fetched.
    pub fn failed(post_id: i64) -> Self {
        Self::new(post_id, FAILED_CONTENT)
    }
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut images = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    images.retain(|image| !image.is_empty());
    images.truncate(MAX_POST_IMAGES);
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_truncated_to_three() {
        let json = r#"{
            "id": 1, "user_id": 2, "category_id": 3,
            "images": ["a.png", "b.png", "c.png", "d.png"],
            "created_at": "2024-01-01T00:00:00Z",
            "visible": true
        }"#;
        let post: PostMeta = serde_json::from_str(json).unwrap();
        assert_eq!(post.images, vec!["a.png", "b.png", "c.png"]);
        assert!(post.has_image());
    }

    #[test]
    fn test_null_images_and_missing_excerpt() {
        let json = r#"{
            "id": 1, "user_id": 2, "category_id": 3,
            "images": null,
            "created_at": "2024-01-01T00:00:00Z",
            "visible": false
        }"#;
        let post: PostMeta = serde_json::from_str(json).unwrap();
        assert!(post.images.is_empty());
        assert!(!post.has_image());
        assert_eq!(post.excerpt, "");
        assert!(!post.visible);
    }

    #[test]
    fn test_empty_image_references_dropped() {
        let json = r#"{"post_id": 9, "content": "hi", "images": ["", "x.png"]}"#;
        let body: PostBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.images, vec!["x.png"]);
    }

    #[test]
    fn test_failed_body_placeholder() {
        let body = PostBody::failed(42);
        assert_eq!(body.post_id, 42);
        assert_eq!(body.content, FAILED_CONTENT);
        assert!(body.images.is_empty());
    }
}
