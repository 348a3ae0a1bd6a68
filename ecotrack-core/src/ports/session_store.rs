//! Session holder port

use crate::domain::result::Result;
use crate::domain::Session;

/// Durable holder of the current session
///
/// Injected into every controller instead of reading storage ad hoc.
pub trait SessionStore: Send + Sync {
    /// Read the persisted identity. Never fails: anything unreadable is the
    /// anonymous session.
    fn get(&self) -> Session;

    /// Persist both fields. Readers never observe only one of them.
    fn set(&self, user_id: &str, display_name: &str) -> Result<()>;

    /// Remove both fields
    fn clear(&self) -> Result<()>;
}
