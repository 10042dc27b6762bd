//! Authentication handler.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::PrincipalResponse;
use crate::errors::{AppError, AppResult};
use crate::services::AuthOutcome;

/// Credential verification request
#[derive(Deserialize, Validate, ToSchema)]
pub struct AuthRequest {
    /// Login identifier (the account email)
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "john_doe@example.org")]
    pub identifier: String,
    /// Account secret
    #[validate(length(min = 1, message = "Secret is required"))]
    #[schema(example = "any_password")]
    pub secret: String,
}

// The secret must never reach logs, not even through debug formatting
impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(authenticate))
}

/// Verify credentials and return the authenticated principal
#[utoipa::path(
    post,
    path = "/users/auth",
    tag = "Authentication",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Credentials verified", body = PrincipalResponse),
        (status = 400, description = "Malformed or invalid request body"),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn authenticate(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AuthRequest>,
) -> AppResult<Json<PrincipalResponse>> {
    let outcome = state
        .auth_service
        .authenticate(&payload.identifier, &payload.secret)
        .await?;

    match outcome {
        AuthOutcome::Success(user) => Ok(Json(PrincipalResponse::from(user))),
        // Both failure outcomes answer with the same status and body so a
        // caller cannot probe which identifiers exist or are disabled
        AuthOutcome::InvalidCredentials | AuthOutcome::UserInactive => {
            Err(AppError::InvalidCredentials)
        }
    }
}
