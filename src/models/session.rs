use chrono::{DateTime, Utc};

/// Represents a logged-in browser session. Sessions live only in memory;
/// restarting the server logs everyone out.
#[derive(Debug, Clone)]
pub struct Session {
    /// The ID of the user this session belongs to.
    pub user_id: i64,
    /// The username, kept here so pages can render it without a lookup.
    pub username: String,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` once the session has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
