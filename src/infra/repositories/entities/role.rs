//! Role database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Permission, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Roles reach permissions through the `role_permissions` join table
impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_permission::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_permission::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, attaching the resolved permissions.
    pub fn into_domain(self, permissions: Vec<Permission>) -> Role {
        Role {
            id: self.id,
            name: self.name,
            permissions,
        }
    }
}
