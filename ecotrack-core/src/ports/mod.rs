//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Controllers depend
//! only on these traits, not on concrete implementations.

mod confirm;
mod resource_client;
mod session_store;

pub use confirm::{Confirmer, FixedAnswer};
pub use resource_client::{ApiRequest, Method, ResourceClient};
pub use session_store::SessionStore;
