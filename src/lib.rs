//! Gatekeeper - credential verification service
//!
//! Verifies identifier/secret pairs against a store of users, roles and
//! permissions and exposes the authenticated principal's role and
//! permission set over HTTP for downstream authorization.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Authentication use case
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the initial account
//! cargo run -- seed --email admin@example.org --name Admin --secret change_me_now
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, PrincipalResponse, User};
pub use errors::{AppError, AppResult};
pub use services::{AuthOutcome, AuthService};
