use std::env;

use tower_cookies::Key;

/// Application configuration loaded from environment variables.
///
/// Constructed once at startup and passed by reference into store-path
/// resolution; nothing re-reads the environment afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the SQLite store (default: ".")
    pub data_dir: String,
    /// Testing mode: unique store name per resolution, no write probe.
    pub testing: bool,
    /// Session cookie signing secret, if provided.
    pub(crate) secret_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATA_DIR` - Directory for the SQLite store (default: ".")
    /// - `TESTING` - Set non-empty to enable testing mode
    /// - `SECRET_KEY` - Session cookie signing secret (>= 32 bytes)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string()),
            testing: env::var("TESTING").map(|v| !v.is_empty()).unwrap_or(false),
            secret_key: env::var("SECRET_KEY").ok(),
        }
    }

    /// The key used to sign session cookies.
    ///
    /// Without a usable `SECRET_KEY` a fresh key is generated, which means
    /// sessions do not survive a restart.
    pub fn cookie_key(&self) -> Key {
        match &self.secret_key {
            Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
            _ => {
                tracing::warn!(
                    "SECRET_KEY missing or shorter than 32 bytes; generating a per-process key"
                );
                Key::generate()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
