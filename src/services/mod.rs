//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod password_verifier;

pub use auth_service::{AuthOutcome, AuthService, Authenticator};
pub use password_verifier::{Argon2Verifier, PasswordVerifier};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
