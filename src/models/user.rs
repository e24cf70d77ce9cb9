use sqlx::FromRow;

/// Represents a registered user.
#[derive(FromRow, Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's username.
    pub username: String,
    /// The user's argon2 password hash.
    pub password_hash: String,
}
