//! In-process session holder, for tests and embedders without a data directory

use std::sync::RwLock;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start already logged in
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, user_id: &str, display_name: &str) -> Result<()> {
        if user_id.trim().is_empty() || display_name.trim().is_empty() {
            return Err(Error::validation(
                "La sesión requiere un identificador y un nombre de usuario.",
            ));
        }
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))?;
        *guard = Session::authenticated(user_id, display_name);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .session
            .write()
            .map_err(|_| Error::Storage("session lock poisoned".to_string()))?;
        *guard = Session::anonymous();
        Ok(())
    }
}
