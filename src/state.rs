use std::collections::HashMap;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::models::session::Session;

/// An in-memory store of active sessions, keyed by the session id carried
/// in the `session_id` cookie.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    /// Creates a new, empty `SessionStore`.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Inserts a session under the given id.
    pub async fn insert(&self, session_id: Uuid, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, session);
    }

    /// Gets a session by id. Expired sessions are evicted and treated as
    /// absent.
    pub async fn get(&self, session_id: &Uuid) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                Some(session) if !session.is_expired() => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        None
    }

    /// Removes a session by id, returning it if it existed.
    pub async fn remove(&self, session_id: &Uuid) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: SqlitePool,
    /// The in-memory session store.
    pub sessions: SessionStore,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// Opens the database, ensures the schema exists, and creates the
    /// upload directories.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url).await?;
        crate::db::init_schema(&db).await?;
        tracing::info!("✅ SQLite pool initialized, schema ready");

        for subdir in ["images", "videos"] {
            tokio::fs::create_dir_all(config.upload_root.join(subdir)).await?;
        }
        tracing::info!("✅ Upload directories ready under {:?}", config.upload_root);

        Ok(AppState {
            db,
            sessions: SessionStore::new(),
            config: config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn session(expires_in_days: i64) -> Session {
        Session {
            user_id: 1,
            username: "alice".to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::days(expires_in_days),
        }
    }

    #[tokio::test]
    async fn get_returns_live_sessions() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.insert(id, session(7)).await;

        let found = store.get(&id).await.unwrap();
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn expired_sessions_are_evicted() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.insert(id, session(-1)).await;

        assert!(store.get(&id).await.is_none());
        // gone for good, not just filtered
        assert!(store.remove(&id).await.is_none());
    }

    #[tokio::test]
    async fn remove_drops_the_session() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.insert(id, session(7)).await;

        assert!(store.remove(&id).await.is_some());
        assert!(store.get(&id).await.is_none());
    }
}
