//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the ResourceClient port
//! - JSON file and in-memory holders for the SessionStore port

pub mod http;
pub mod session_file;
pub mod session_memory;

#[cfg(test)]
pub mod mock_api;

pub use http::{HttpResourceClient, DEFAULT_BASE_URL};
pub use session_file::FileSessionStore;
pub use session_memory::MemorySessionStore;
