//! Persistent storage for the session token.
//!
//! The store holds a single `token` entry and outlives the process, so a
//! later run can restore the session without logging in again.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use taskboard_core::{TaskboardError, TaskboardResult};

pub trait CredentialStore: Send + Sync {
    fn get(&self) -> TaskboardResult<Option<String>>;
    fn set(&self, token: &str) -> TaskboardResult<()>;
    fn clear(&self) -> TaskboardResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// JSON file holding `{"token": "..."}`, written atomically with owner-only
/// permissions.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> TaskboardResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<StoredToken>(&contents) {
            Ok(stored) if !stored.token.is_empty() => Ok(Some(stored.token)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable credentials at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn set(&self, token: &str) -> TaskboardResult<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let contents = serde_json::to_vec_pretty(&StoredToken {
            token: token.to_string(),
        })
        .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(&contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(temp_file.path(), std::fs::Permissions::from_mode(0o600))?;
        }

        temp_file
            .persist(&self.path)
            .map_err(|e| TaskboardError::Io(e.error))?;

        tracing::debug!("Stored credentials at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> TaskboardResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed credentials at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    fn slot(&self) -> TaskboardResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| TaskboardError::Internal("credential store lock poisoned".to_string()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> TaskboardResult<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn set(&self, token: &str) -> TaskboardResult<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> TaskboardResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}
