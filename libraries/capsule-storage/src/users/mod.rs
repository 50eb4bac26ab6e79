//! User queries
//!
//! Users are only ever inserted (first login) and read; nothing here
//! updates or deletes them.

use crate::StorageError;
use capsule_core::types::{NewUser, User, UserId};
use sqlx::SqlitePool;

type Result<T> = std::result::Result<T, StorageError>;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    github_id: i64,
    login: String,
    name: String,
    avatar_url: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            github_id: row.github_id,
            login: row.login,
            name: row.name,
            avatar_url: row.avatar_url,
        }
    }
}

/// Find a user by identity provider id
pub async fn find_by_github_id(pool: &SqlitePool, github_id: i64) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, github_id, login, name, avatar_url FROM users WHERE github_id = ?",
    )
    .bind(github_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Get a user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, github_id, login, name, avatar_url FROM users WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Create a user
///
/// # Errors
///
/// Returns [`StorageError::Conflict`] if a user with the same `github_id`
/// already exists. Callers racing on a first login should treat that as
/// "already registered" and re-read with [`find_by_github_id`].
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let id = UserId::generate();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO users (id, github_id, login, name, avatar_url, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.as_str())
    .bind(user.github_id)
    .bind(&user.login)
    .bind(&user.name)
    .bind(&user.avatar_url)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(User {
        id,
        github_id: user.github_id,
        login: user.login,
        name: user.name,
        avatar_url: user.avatar_url,
    })
}

/// Get all users in registration order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, github_id, login, name, avatar_url FROM users ORDER BY created_at, rowid",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}
