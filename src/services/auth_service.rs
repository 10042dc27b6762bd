//! Authentication service - credential verification against the store.

use async_trait::async_trait;
use std::sync::Arc;

use super::password_verifier::PasswordVerifier;
use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Well-formed Argon2id digest of a throwaway value.
///
/// Verification against it runs the full key derivation and always fails,
/// so an attempt with an unknown identifier costs the same as one with a
/// wrong secret.
const FALLBACK_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$QUJDREVGR0hJSktMTU5PUFFSU1RVVldYWVphYmNkZWY";

/// Result of a credential verification attempt.
///
/// The two failure outcomes stay separate internally so inactive accounts
/// can be audited; callers facing the network must collapse them into one
/// indistinguishable rejection.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Credentials verified; carries the principal with roles and
    /// permissions resolved for downstream authorization
    Success(User),
    /// Unknown identifier or wrong secret, deliberately not distinguished
    InvalidCredentials,
    /// Credentials may be correct but the account is disabled
    UserInactive,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify an identifier/secret pair against the credential store
    async fn authenticate(&self, identifier: &str, secret: &str) -> AppResult<AuthOutcome>;
}

/// Concrete implementation of AuthService.
///
/// Collaborators are constructor-injected as trait objects; there is no
/// ambient container.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, verifier: Arc<dyn PasswordVerifier>) -> Self {
        Self { users, verifier }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(&self, identifier: &str, secret: &str) -> AppResult<AuthOutcome> {
        let user = self.users.find_by_email(identifier).await?;

        let digest = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| FALLBACK_DIGEST.to_string());
        let secret_matches = self.verifier.verify(secret, &digest);

        let Some(user) = user else {
            return Ok(AuthOutcome::InvalidCredentials);
        };

        if !user.active {
            // Distinct audit trail; the HTTP mapping stays identical to
            // the invalid-credentials outcome.
            tracing::warn!(user_id = %user.id, "authentication attempt on inactive account");
            return Ok(AuthOutcome::UserInactive);
        }

        if !secret_matches {
            tracing::debug!(user_id = %user.id, "secret mismatch");
            return Ok(AuthOutcome::InvalidCredentials);
        }

        Ok(AuthOutcome::Success(user))
    }
}
