//! Page controllers
//!
//! One controller per page. Each owns its form validation and the request
//! lifecycle of its views, and talks to the outside only through ports.

mod emissions;
mod favorites;
mod home;
mod login;
mod product;
mod register;
pub mod view;

pub use emissions::{EmissionsController, AVAILABLE_YEARS};
pub use favorites::{FavoritesController, RemoveOutcome, REMOVE_PROMPT};
pub use home::{Home, HomeController};
pub use login::{LoggedIn, LoginController};
pub use product::ProductScannerController;
pub use register::{RegisterController, Registered};
pub use view::{View, ViewState};
