//! User, role and permission domain entities.
//!
//! Associations are held acyclically: a `User` owns its resolved `Role`s and
//! a `Role` owns its resolved `Permission`s. There are no back-references,
//! so the graph can be serialized and cloned freely.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single grantable capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Permission {
    pub id: Uuid,
    /// Unique capability name, e.g. `VIEW_USER_ROLES`
    pub name: String,
}

/// A named set of permissions, assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: Uuid,
    /// Unique role name, e.g. `ADMIN`
    pub name: String,
    pub permissions: Vec<Permission>,
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Login identifier, unique across users
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Disabled accounts keep their data but fail authentication
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<Role>,
}

impl User {
    /// Effective permission set: the union of permissions across all
    /// assigned roles, deduplicated and ordered by name.
    pub fn permissions(&self) -> Vec<String> {
        self.roles
            .iter()
            .flat_map(|role| role.permissions.iter().map(|p| p.name.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names of all assigned roles, ordered.
    pub fn role_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.roles.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    /// Check whether a role with the given name is assigned.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.name == name)
    }
}

/// Payload for the administrative user-creation operation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub active: bool,
    /// Ids of roles to assign at creation time
    pub role_ids: Vec<Uuid>,
}

/// Authenticated principal representation (safe to return to client).
///
/// Carries the role and permission names downstream authorization needs,
/// never the stored digest.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrincipalResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "john_doe@example.org")]
    pub email: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Assigned role names
    #[schema(example = json!(["ADMIN"]))]
    pub roles: Vec<String>,
    /// Union of permissions across assigned roles
    #[schema(example = json!(["VIEW_USER_ROLES"]))]
    pub permissions: Vec<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for PrincipalResponse {
    fn from(user: User) -> Self {
        let permissions = user.permissions();
        let roles = user.role_names();
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            roles,
            permissions,
            created_at: user.created_at,
        }
    }
}
