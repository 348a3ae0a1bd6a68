//! Core domain entities
//!
//! Transient projections of server-owned state plus the client's own session
//! record. Pure data, no I/O.

mod emission;
mod ids;
mod product;
mod session;
mod user;
pub mod result;

pub(crate) use ids::id_from_value;

pub use emission::{format_tonnes, EmissionRecord, EmissionsQuery, NO_EMISSIONS_DATA};
pub use product::{or_not_available, FavoriteEntry, Product, NOT_AVAILABLE};
pub use session::{Session, SessionUser};
pub use user::{LoginForm, RegistrationForm};
