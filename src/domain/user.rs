use serde::{Deserialize, Deserializer, Serialize};

/// Display name for an author that could not be resolved.
pub const UNKNOWN_USER_NAME: &str = "unknown user";
/// Display name for an author whose whole card failed to compose.
pub const FAILED_USER_NAME: &str = "failed to load";
/// Avatar reference used whenever the real one is unavailable.
pub const DEFAULT_AVATAR: &str = "avatar/default.png";
/// Name for a category that could not be resolved.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_avatar", deserialize_with = "deserialize_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

impl User {
    /// Sentinel author for a failed author fetch. The id is preserved.
    pub fn unknown(id: i64) -> Self {
        Self::sentinel(id, UNKNOWN_USER_NAME)
    }

    /// Sentinel author for an item whose composition failed outright.
    pub fn failed(id: i64) -> Self {
        Self::sentinel(id, FAILED_USER_NAME)
    }

    fn sentinel(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            bio: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn uncategorized(id: i64) -> Self {
        Self {
            id,
            name: UNCATEGORIZED.to_string(),
            description: String::new(),
        }
    }
}

fn default_avatar() -> String {
    DEFAULT_AVATAR.to_string()
}

fn deserialize_avatar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|avatar| !avatar.is_empty())
        .unwrap_or_else(default_avatar))
}
