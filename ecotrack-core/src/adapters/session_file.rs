//! File-backed session holder
//!
//! Persists the session as `session.json` in the Ecotrack directory:
//! ```json
//! { "user_id": "42", "username": "ana" }
//! ```
//! Survives restarts and never expires on its own.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

const SESSION_FILENAME: &str = "session.json";

/// On-disk layout: the two keys the app has always used
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// Session holder backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session in `<ecotrack_dir>/session.json`
    pub fn new(ecotrack_dir: &Path) -> Self {
        Self {
            path: ecotrack_dir.join(SESSION_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Option<SessionFile> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "ignoring malformed session file");
                None
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Session {
        match self.read_file() {
            Some(file) => Session::from_parts(file.user_id, file.username),
            None => Session::anonymous(),
        }
    }

    fn set(&self, user_id: &str, display_name: &str) -> Result<()> {
        if user_id.trim().is_empty() || display_name.trim().is_empty() {
            return Err(Error::validation(
                "La sesión requiere un identificador y un nombre de usuario.",
            ));
        }

        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::Storage("Session path has no parent directory".to_string()))?;
        std::fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(&SessionFile {
            user_id: Some(user_id.to_string()),
            username: Some(display_name.to_string()),
        })?;

        // Write next to the target and rename so readers see old or new, never half
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}
