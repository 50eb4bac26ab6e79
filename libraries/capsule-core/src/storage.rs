//! Storage contract shared by the server and the `SQLite` implementation

use crate::error::Result;
use crate::types::{CreateMemory, Memory, MemoryId, NewUser, UpdateMemory, User};
use async_trait::async_trait;

/// Persistence gateway over users and memories
///
/// Every operation touches a single record and is atomic on its own.
/// Implementations must enforce uniqueness of `github_id` and report a
/// duplicate insert as [`CapsuleError::Conflict`](crate::CapsuleError::Conflict).
#[async_trait]
pub trait Storage: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Find a user by the identity provider's numeric id
    async fn find_user_by_github_id(&self, github_id: i64) -> Result<Option<User>>;

    /// Create a user on first login
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Get all users, oldest first
    async fn list_users(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Memories
    // ========================================================================

    /// Get all memories ordered by creation time (ascending)
    async fn list_memories(&self) -> Result<Vec<Memory>>;

    /// Get a memory, failing with `NotFound` if absent
    async fn get_memory(&self, id: &MemoryId) -> Result<Memory>;

    /// Create a memory owned by `memory.user_id`
    async fn create_memory(&self, memory: CreateMemory) -> Result<Memory>;

    /// Replace content, cover and visibility of an existing memory
    async fn update_memory(&self, id: &MemoryId, memory: UpdateMemory) -> Result<Memory>;

    /// Delete a memory, failing with `NotFound` if absent
    async fn delete_memory(&self, id: &MemoryId) -> Result<()>;
}
