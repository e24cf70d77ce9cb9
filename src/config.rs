use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use sha2::{Digest, Sha512};
use tower_cookies::Key;

/// The value used to sign cookies when `SECRET_KEY` is unset. Fine for a
/// local demo, useless for anything else.
const DEV_SECRET_KEY: &str = "dev-secret-key-change-me";

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the SQLite database.
    pub database_url: String,
    /// The address and port the server listens on.
    pub bind_addr: SocketAddr,
    /// The directory that holds the `images/` and `videos/` upload folders.
    pub upload_root: PathBuf,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The key used to sign the flash cookie, derived from `SECRET_KEY`.
    pub cookie_key: Key,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// Every variable has a default so the demo runs with no setup at all.
    pub fn from_env() -> Result<Self> {
        let secret_key = match env::var("SECRET_KEY") {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("⚠️  SECRET_KEY not set, using insecure development default");
                DEV_SECRET_KEY.to_string()
            }
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:sketchy.db".to_string()),
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
                .parse()
                .context("Invalid BIND_ADDR")?,
            upload_root: env::var("UPLOAD_ROOT")
                .unwrap_or_else(|_| "static/uploads".to_string())
                .into(),
            session_duration_days: env::var("SESSION_DURATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid SESSION_DURATION_DAYS")?,
            cookie_key: derive_cookie_key(&secret_key),
        })
    }
}

/// Derives a 64-byte cookie-signing key from an arbitrary-length secret.
pub fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
