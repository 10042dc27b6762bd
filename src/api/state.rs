//! Application state - explicit dependency wiring.
//!
//! Collaborators are constructed once and injected by constructor; there
//! is no service container or ambient registry.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{Argon2Verifier, AuthService, Authenticator};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the default service graph over a connected database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let verifier = Arc::new(Argon2Verifier);
        let auth_service = Arc::new(Authenticator::new(users, verifier));

        Self {
            auth_service,
            database,
        }
    }

    /// Create state with manually injected services (tests, alternatives).
    pub fn new(auth_service: Arc<dyn AuthService>, database: Arc<Database>) -> Self {
        Self {
            auth_service,
            database,
        }
    }
}
