//! Role repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::{role, role_permission, user_role};
use super::user_repository::load_role;
use crate::domain::Role;
use crate::errors::{AppError, AppResult};

/// Role store contract. Roles are managed administratively; the
/// authentication path only ever reads them through the user lookup.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Create a role and grant it the given permissions
    async fn create(&self, name: &str, permission_ids: Vec<Uuid>) -> AppResult<Role>;

    /// Find role by its unique name, permissions resolved
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// Remove every role, grant and assignment (fixture management)
    async fn delete_all(&self) -> AppResult<()>;
}

/// Concrete implementation of RoleRepository over SeaORM
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoleRepository for RoleStore {
    async fn create(&self, name: &str, permission_ids: Vec<Uuid>) -> AppResult<Role> {
        let active_model = role::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;

        for permission_id in permission_ids {
            role_permission::Entity::insert(role_permission::ActiveModel {
                role_id: Set(model.id),
                permission_id: Set(permission_id),
            })
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        }

        load_role(&self.db, model).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        let result = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match result {
            Some(model) => Ok(Some(load_role(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn delete_all(&self) -> AppResult<()> {
        user_role::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        role_permission::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        role::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
