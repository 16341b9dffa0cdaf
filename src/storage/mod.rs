//! Key/value storage abstraction for client-side state
//!
//! The session store persists through a [`StorageMedium`] so the same code
//! path works whether or not durable storage is usable in the current
//! environment (missing home directory, unwritable config dir, sandboxed
//! runs). Failures never propagate past this module.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Storage capability: get/set/remove of a named serialized value.
///
/// All operations are infallible from the caller's point of view.
/// Implementations log failures and carry on.
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Delete the entry for `key` if present.
    fn remove(&self, key: &str);
}

/// Resolve the best available storage medium for this environment.
///
/// Probes for a writable durable location and falls back to the no-op
/// medium when the probe fails for any reason. Never errors; the worst
/// outcome is state that only lives as long as the process.
pub fn resolve() -> Arc<dyn StorageMedium> {
    match FileStorage::probe() {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::warn!("Durable storage unavailable ({:#}); session state will not survive restarts", e);
            Arc::new(NoopStorage)
        }
    }
}

/// Durable medium: one file per key in the platform config directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Locate the storage directory and verify it is actually writable.
    fn probe() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "storefront-cli", "storefront-cli")
            .context("Could not determine config directory")?;
        let dir = proj_dirs.config_dir().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;

        // A resolvable directory can still be read-only; prove we can write.
        let probe = dir.join(".probe");
        fs::write(&probe, b"").context("Storage directory is not writable")?;
        let _ = fs::remove_file(&probe);

        Ok(Self { dir })
    }

    #[cfg(test)]
    fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageMedium for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, value) {
            tracing::warn!("Failed to persist {}: {}", key, e);
            return;
        }

        // Restrictive permissions (may contain a session token)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            if let Err(e) = fs::set_permissions(&path, perms) {
                tracing::warn!("Failed to set permissions on {}: {}", key, e);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = fs::remove_file(self.path_for(key)) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", key, e);
            }
        }
    }
}

/// Ephemeral fallback: accepts writes, never returns data.
pub struct NoopStorage;

impl StorageMedium for NoopStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// In-memory medium for tests that need durable-like behavior without
/// touching the filesystem.
#[cfg(test)]
pub(crate) struct MemoryStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub(crate) fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
impl StorageMedium for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
