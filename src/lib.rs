//! Operator panel for browsing user accounts and changing their role.
//!
//! The panel talks to a user backend over its JSON API and serves the
//! resulting table as server-rendered HTML.

pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod render;
pub mod routes;
pub mod templates;
pub mod utils;

pub use error::{ApiError, ConfigError};
