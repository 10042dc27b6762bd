//! Permission repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::{permission, role_permission};
use crate::domain::Permission;
use crate::errors::{AppError, AppResult};

/// Permission store contract.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Create a permission with a unique name
    async fn create(&self, name: &str) -> AppResult<Permission>;

    /// Find permission by its unique name
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>>;

    /// Remove every permission and grant (fixture management)
    async fn delete_all(&self) -> AppResult<()>;
}

/// Concrete implementation of PermissionRepository over SeaORM
pub struct PermissionStore {
    db: DatabaseConnection,
}

impl PermissionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PermissionRepository for PermissionStore {
    async fn create(&self, name: &str) -> AppResult<Permission> {
        let active_model = permission::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Permission::from(model))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Permission>> {
        let result = permission::Entity::find()
            .filter(permission::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Permission::from))
    }

    async fn delete_all(&self) -> AppResult<()> {
        role_permission::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        permission::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
