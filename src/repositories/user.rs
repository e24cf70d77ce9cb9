use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::user::User;

/// Inserts a new user row and returns it.
///
/// The unique constraint on `username` is left to the database; callers
/// map the violation to a user-facing message.
pub async fn create(db: &SqlitePool, username: &str, password_hash: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES (?1, ?2)
        RETURNING id, username, password_hash
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(db)
    .await?;

    Ok(user)
}

/// Looks up a user by username.
pub async fn find_by_username(db: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash
        FROM users
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(user)
}
