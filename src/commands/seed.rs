//! Seed command - the administrative account-creation operation.
//!
//! Creates a user with the seed role and its permission grants.
//! Existing permissions and roles are reused so the command can run
//! against a populated store.

use crate::cli::SeedArgs;
use crate::config::{Config, SEED_PERMISSIONS, SEED_ROLE};
use crate::domain::{NewUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    Database, PermissionRepository, PermissionStore, RoleRepository, RoleStore, UserRepository,
    UserStore,
};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_with(&config.database_url, config.db_max_connections)
        .await
        .map_err(AppError::from)?;
    db.run_migrations().await?;

    let permissions = PermissionStore::new(db.get_connection());
    let roles = RoleStore::new(db.get_connection());
    let users = UserStore::new(db.get_connection());

    let mut permission_ids = Vec::with_capacity(SEED_PERMISSIONS.len());
    for name in SEED_PERMISSIONS {
        let permission = match permissions.find_by_name(name).await? {
            Some(permission) => permission,
            None => permissions.create(name).await?,
        };
        permission_ids.push(permission.id);
    }

    let role = match roles.find_by_name(SEED_ROLE).await? {
        Some(role) => role,
        None => roles.create(SEED_ROLE, permission_ids).await?,
    };

    if users.find_by_email(&args.email).await?.is_some() {
        return Err(AppError::conflict("User"));
    }

    let password_hash = Password::new(&args.secret)?.into_string();
    let user = users
        .create(NewUser {
            email: args.email,
            name: args.name,
            password_hash,
            active: true,
            role_ids: vec![role.id],
        })
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, role = SEED_ROLE, "Seed account created");

    Ok(())
}
