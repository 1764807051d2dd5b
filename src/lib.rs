pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod namespace;
pub mod session;

pub use app::app;
pub use namespace::{normalize_franchise_name, resolve, Namespace};
pub use session::{SessionIdentity, Tier};
