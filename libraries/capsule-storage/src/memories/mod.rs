//! Memory queries

use crate::StorageError;
use capsule_core::types::{CreateMemory, Memory, MemoryId, UpdateMemory, UserId};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, StorageError>;

const COLUMNS: &str = "id, content, cover_url, is_public, created_at, user_id";

#[derive(sqlx::FromRow)]
struct MemoryRow {
    id: String,
    content: String,
    cover_url: String,
    is_public: bool,
    created_at: i64,
    user_id: String,
}

impl TryFrom<MemoryRow> for Memory {
    type Error = StorageError;

    fn try_from(row: MemoryRow) -> Result<Self> {
        let id = MemoryId::parse(&row.id)
            .map_err(|e| StorageError::SerializationError(format!("memory {}: {}", row.id, e)))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(row.created_at).ok_or_else(|| {
            StorageError::SerializationError(format!(
                "memory {}: invalid created_at {}",
                row.id, row.created_at
            ))
        })?;

        Ok(Self {
            id,
            content: row.content,
            cover_url: row.cover_url,
            is_public: row.is_public,
            created_at,
            user_id: UserId::new(row.user_id),
        })
    }
}

/// Get all memories, oldest first
///
/// Rows created within the same millisecond keep insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Memory>> {
    let rows = sqlx::query_as::<_, MemoryRow>(&format!(
        "SELECT {COLUMNS} FROM memories ORDER BY created_at ASC, rowid ASC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Memory::try_from).collect()
}

/// Get a memory by ID
pub async fn get_by_id(pool: &SqlitePool, id: &MemoryId) -> Result<Option<Memory>> {
    let row = sqlx::query_as::<_, MemoryRow>(&format!(
        "SELECT {COLUMNS} FROM memories WHERE id = ?"
    ))
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(Memory::try_from).transpose()
}

/// Create a memory
pub async fn create(pool: &SqlitePool, memory: CreateMemory) -> Result<Memory> {
    let id = MemoryId::generate();
    let now = Utc::now().timestamp_millis();

    let row = sqlx::query_as::<_, MemoryRow>(&format!(
        "INSERT INTO memories (id, content, cover_url, is_public, created_at, user_id)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING {COLUMNS}"
    ))
    .bind(id.to_string())
    .bind(&memory.content)
    .bind(&memory.cover_url)
    .bind(memory.is_public)
    .bind(now)
    .bind(memory.user_id.as_str())
    .fetch_one(pool)
    .await?;

    Memory::try_from(row)
}

/// Replace content, cover and visibility of a memory
///
/// Returns `NotFound` if no memory has this id.
pub async fn update(pool: &SqlitePool, id: &MemoryId, memory: UpdateMemory) -> Result<Memory> {
    let row = sqlx::query_as::<_, MemoryRow>(&format!(
        "UPDATE memories SET content = ?, cover_url = ?, is_public = ?
         WHERE id = ?
         RETURNING {COLUMNS}"
    ))
    .bind(&memory.content)
    .bind(&memory.cover_url)
    .bind(memory.is_public)
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StorageError::not_found("Memory", id.to_string()))?;

    Memory::try_from(row)
}

/// Delete a memory
///
/// Returns `NotFound` if no memory has this id.
pub async fn delete(pool: &SqlitePool, id: &MemoryId) -> Result<()> {
    let result = sqlx::query("DELETE FROM memories WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found("Memory", id.to_string()));
    }

    Ok(())
}
