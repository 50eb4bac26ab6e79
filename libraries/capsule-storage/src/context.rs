use crate::{memories, users};
use async_trait::async_trait;
use capsule_core::{
    error::Result,
    storage::Storage,
    types::{CreateMemory, Memory, MemoryId, NewUser, UpdateMemory, User},
    CapsuleError,
};
use sqlx::SqlitePool;

/// `SQLite`-backed storage context
///
/// Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url` and bring the schema up to date
    pub async fn new(database_url: &str) -> std::result::Result<Self, crate::StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Storage for Database {
    // Users
    async fn find_user_by_github_id(&self, github_id: i64) -> Result<Option<User>> {
        Ok(users::find_by_github_id(&self.pool, github_id).await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    // Memories
    async fn list_memories(&self) -> Result<Vec<Memory>> {
        Ok(memories::get_all(&self.pool).await?)
    }

    async fn get_memory(&self, id: &MemoryId) -> Result<Memory> {
        memories::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CapsuleError::not_found("Memory", id.to_string()))
    }

    async fn create_memory(&self, memory: CreateMemory) -> Result<Memory> {
        Ok(memories::create(&self.pool, memory).await?)
    }

    async fn update_memory(&self, id: &MemoryId, memory: UpdateMemory) -> Result<Memory> {
        Ok(memories::update(&self.pool, id, memory).await?)
    }

    async fn delete_memory(&self, id: &MemoryId) -> Result<()> {
        Ok(memories::delete(&self.pool, id).await?)
    }
}
