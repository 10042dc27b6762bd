//! Infrastructure layer - External systems integration
//!
//! This module handles the persistence concerns behind the
//! repository traits: database connections, SeaORM entities
//! and migrations.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    PermissionRepository, PermissionStore, RoleRepository, RoleStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
