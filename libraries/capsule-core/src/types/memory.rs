/// Memory domain types
use super::ids::{MemoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters of `content` kept in a list excerpt
pub const EXCERPT_LENGTH: usize = 115;

const EXCERPT_SUFFIX: &str = "...";

/// A journal entry with a cover image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: MemoryId,
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    /// Owning user
    pub user_id: UserId,
}

/// Data for creating a memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMemory {
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
    pub user_id: UserId,
}

/// Replacement values for an existing memory
///
/// `created_at` and `user_id` are never touched by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMemory {
    pub content: String,
    pub cover_url: String,
    pub is_public: bool,
}

/// List view of a memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySummary {
    pub id: MemoryId,
    pub cover_url: String,
    pub excerpt: String,
}

impl MemorySummary {
    /// First [`EXCERPT_LENGTH`] characters of `content` followed by `"..."`.
    ///
    /// The suffix is appended even when nothing was cut off.
    pub fn excerpt_of(content: &str) -> String {
        let mut excerpt: String = content.chars().take(EXCERPT_LENGTH).collect();
        excerpt.push_str(EXCERPT_SUFFIX);
        excerpt
    }
}

impl From<&Memory> for MemorySummary {
    fn from(memory: &Memory) -> Self {
        Self {
            id: memory.id,
            cover_url: memory.cover_url.clone(),
            excerpt: Self::excerpt_of(&memory.content),
        }
    }
}

impl From<Memory> for MemorySummary {
    fn from(memory: Memory) -> Self {
        Self {
            excerpt: Self::excerpt_of(&memory.content),
            id: memory.id,
            cover_url: memory.cover_url,
        }
    }
}
