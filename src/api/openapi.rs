//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::domain::{Permission, PrincipalResponse, Role};

/// OpenAPI documentation for the credential verification service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gatekeeper",
        version = "0.1.0",
        description = "Credential verification service with role and permission resolution",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(auth_handler::authenticate),
    components(
        schemas(
            auth_handler::AuthRequest,
            PrincipalResponse,
            Role,
            Permission,
        )
    ),
    tags(
        (name = "Authentication", description = "Credential verification")
    )
)]
pub struct ApiDoc;
