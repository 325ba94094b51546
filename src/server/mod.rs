//! Server module for building the dashboard HTTP server
//!
//! `ServerBuilder` wires the stores, the sign-in provider and the clock into
//! the invoice and login actions, then mounts them as routes.

pub mod builder;
pub mod routes;
pub mod state;

pub use builder::ServerBuilder;
pub use routes::{InvoicePage, ListParams, build_routes};
pub use state::AppState;
