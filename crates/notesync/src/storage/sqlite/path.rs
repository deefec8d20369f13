//! Store location resolution.
//!
//! Picks the directory and file name for the SQLite store. The configured
//! data directory is probed for writability first; when it cannot be used
//! the store falls back to the current directory rather than refusing to
//! start. In testing mode each resolution cycle gets a unique file name so
//! parallel test runs never share a store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::config::Config;

const WRITE_PROBE: &str = ".write-probe";

/// Resolver for the SQLite store location.
///
/// The resolved path is cached: every call to [`StorePath::resolve`] after
/// the first returns the same path until [`StorePath::reset`] clears it.
pub struct StorePath {
    data_dir: PathBuf,
    testing: bool,
    resolved: Mutex<Option<PathBuf>>,
}

impl StorePath {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            testing: config.testing,
            resolved: Mutex::new(None),
        }
    }

    /// Resolve the store path, caching the result.
    pub fn resolve(&self) -> PathBuf {
        let mut cached = match self.resolved.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(path) = cached.as_ref() {
            return path.clone();
        }

        let dir = self.resolve_data_dir();
        let path = dir.join(self.file_name());
        *cached = Some(path.clone());
        path
    }

    /// Forget the cached path so the next [`StorePath::resolve`] picks a
    /// fresh one. Only meaningful in testing mode, where each resolution
    /// yields a new file name.
    pub fn reset(&self) {
        let mut cached = match self.resolved.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *cached = None;
    }

    /// Pick the directory for the store, falling back to "." when the
    /// configured one is unusable.
    fn resolve_data_dir(&self) -> PathBuf {
        if self.testing {
            // Test stores are throwaway files; the directory still has to
            // exist, but the probe is skipped.
            let _ = fs::create_dir_all(&self.data_dir);
            return self.data_dir.clone();
        }

        if Self::is_writable(&self.data_dir) {
            return self.data_dir.clone();
        }

        tracing::warn!(
            data_dir = %self.data_dir.display(),
            "Data directory is not writable, falling back to current directory"
        );
        PathBuf::from(".")
    }

    /// Verify the directory exists and accepts writes by creating and
    /// removing a probe file.
    fn is_writable(dir: &Path) -> bool {
        if fs::create_dir_all(dir).is_err() {
            return false;
        }

        let probe = dir.join(WRITE_PROBE);
        match fs::write(&probe, b"") {
            Ok(()) => {
                let _ = fs::remove_file(&probe);
                true
            }
            Err(_) => false,
        }
    }

    fn file_name(&self) -> String {
        if self.testing {
            format!("notesync-test-{}.db", &Uuid::new_v4().simple().to_string()[..8])
        } else {
            "notesync.db".to_string()
        }
    }
}
