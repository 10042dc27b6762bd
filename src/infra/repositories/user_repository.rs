//! User repository with role and permission resolution.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::{permission, role, user, user_role};
use crate::domain::{NewUser, Permission, Role, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential store contract for user lookup and the administrative
/// write path.
///
/// `find_by_email` is the read path of authentication: a case-sensitive
/// exact match that returns the user with roles and permissions resolved.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email, exact match, with the role graph resolved
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by id with the role graph resolved
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Create a user and its role assignments
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Count all stored users
    async fn count(&self) -> AppResult<u64>;

    /// Remove every user and role assignment (fixture management)
    async fn delete_all(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve the association graph for a fetched user row.
    ///
    /// Roles and their permissions are loaded with explicit follow-up
    /// queries, one level at a time, so the resulting domain value holds
    /// no cyclic references.
    async fn resolve(&self, model: user::Model) -> AppResult<User> {
        let role_models = model
            .find_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut roles = Vec::with_capacity(role_models.len());
        for role_model in role_models {
            roles.push(load_role(&self.db, role_model).await?);
        }

        Ok(model.into_domain(roles))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(Some(self.resolve(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(Some(self.resolve(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            name: Set(new_user.name),
            password_hash: Set(new_user.password_hash),
            active: Set(new_user.active),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        for role_id in new_user.role_ids {
            user_role::Entity::insert(user_role::ActiveModel {
                user_id: Set(model.id),
                role_id: Set(role_id),
            })
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        }

        self.resolve(model).await
    }

    async fn count(&self) -> AppResult<u64> {
        user::Entity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn delete_all(&self) -> AppResult<()> {
        user_role::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        user::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}

/// Build the role graph for a role model (shared with the role store)
pub(super) async fn load_role(
    db: &DatabaseConnection,
    role_model: role::Model,
) -> AppResult<Role> {
    let permissions: Vec<Permission> = role_model
        .find_related(permission::Entity)
        .all(db)
        .await
        .map_err(AppError::from)?
        .into_iter()
        .map(Permission::from)
        .collect();
    Ok(role_model.into_domain(permissions))
}
