//! Integration tests for the credential store.
//!
//! Runs against a freshly migrated in-memory SQLite database and checks
//! that stored users survive a round trip with their associations intact.

use std::sync::Arc;

use gatekeeper::domain::{NewUser, Password};
use gatekeeper::infra::{
    Database, PermissionRepository, PermissionStore, RoleRepository, RoleStore, UserRepository,
    UserStore,
};
use gatekeeper::services::{AuthOutcome, AuthService, Authenticator, Argon2Verifier};

const USER_EMAIL: &str = "john_doe@example.org";
const USER_NAME: &str = "John Doe";
const USER_SECRET: &str = "any_password";

struct Stores {
    db: Database,
    users: UserStore,
    roles: RoleStore,
    permissions: PermissionStore,
}

async fn fresh_stores() -> Stores {
    let db = Database::connect_with("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    db.run_migrations().await.expect("migrations");

    Stores {
        users: UserStore::new(db.get_connection()),
        roles: RoleStore::new(db.get_connection()),
        permissions: PermissionStore::new(db.get_connection()),
        db,
    }
}

/// Seed the store with the single admin account and return its id.
async fn seed_admin(stores: &Stores) -> uuid::Uuid {
    let view_roles = stores.permissions.create("VIEW_USER_ROLES").await.unwrap();
    let admin = stores.roles.create("ADMIN", vec![view_roles.id]).await.unwrap();

    let user = stores
        .users
        .create(NewUser {
            email: USER_EMAIL.to_string(),
            name: USER_NAME.to_string(),
            password_hash: Password::new(USER_SECRET).unwrap().into_string(),
            active: true,
            role_ids: vec![admin.id],
        })
        .await
        .unwrap();
    user.id
}

#[tokio::test]
async fn store_count_after_seeding_is_one() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    assert_eq!(stores.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn stored_user_round_trips_with_associations() {
    let stores = fresh_stores().await;
    let created_id = seed_admin(&stores).await;

    let user = stores
        .users
        .find_by_email(USER_EMAIL)
        .await
        .unwrap()
        .expect("seeded user");

    assert_eq!(user.id, created_id);
    assert_eq!(user.email, USER_EMAIL);
    assert_eq!(user.name, USER_NAME);
    assert!(user.active);
    assert_eq!(user.role_names(), vec!["ADMIN"]);
    assert_eq!(user.permissions(), vec!["VIEW_USER_ROLES"]);

    // the same graph is reachable by id
    let by_id = stores
        .users
        .find_by_id(created_id)
        .await
        .unwrap()
        .expect("seeded user");
    assert_eq!(by_id.email, user.email);
    assert_eq!(by_id.role_names(), user.role_names());
}

#[tokio::test]
async fn email_lookup_is_exact_and_case_sensitive() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    assert!(stores
        .users
        .find_by_email("JOHN_DOE@EXAMPLE.ORG")
        .await
        .unwrap()
        .is_none());
    assert!(stores
        .users
        .find_by_email("john_doe")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    let result = stores
        .users
        .create(NewUser {
            email: USER_EMAIL.to_string(),
            name: "Impostor".to_string(),
            password_hash: Password::new("another_secret").unwrap().into_string(),
            active: true,
            role_ids: vec![],
        })
        .await;

    assert!(result.is_err());
    assert_eq!(stores.users.count().await.unwrap(), 1);
}

#[tokio::test]
async fn permission_set_is_union_across_roles() {
    let stores = fresh_stores().await;

    let view = stores.permissions.create("VIEW_USER_ROLES").await.unwrap();
    let edit = stores.permissions.create("EDIT_USERS").await.unwrap();
    let admin = stores
        .roles
        .create("ADMIN", vec![view.id, edit.id])
        .await
        .unwrap();
    let auditor = stores.roles.create("AUDITOR", vec![view.id]).await.unwrap();

    let user = stores
        .users
        .create(NewUser {
            email: USER_EMAIL.to_string(),
            name: USER_NAME.to_string(),
            password_hash: Password::new(USER_SECRET).unwrap().into_string(),
            active: true,
            role_ids: vec![admin.id, auditor.id],
        })
        .await
        .unwrap();

    assert_eq!(user.role_names(), vec!["ADMIN", "AUDITOR"]);
    // VIEW_USER_ROLES is granted through both roles but appears once
    assert_eq!(user.permissions(), vec!["EDIT_USERS", "VIEW_USER_ROLES"]);
}

#[tokio::test]
async fn role_and_permission_lookup_by_name() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    let role = stores
        .roles
        .find_by_name("ADMIN")
        .await
        .unwrap()
        .expect("seeded role");
    assert_eq!(role.permissions.len(), 1);
    assert_eq!(role.permissions[0].name, "VIEW_USER_ROLES");

    assert!(stores
        .permissions
        .find_by_name("VIEW_USER_ROLES")
        .await
        .unwrap()
        .is_some());
    assert!(stores.roles.find_by_name("NOBODY").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_all_resets_the_fixture() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    stores.users.delete_all().await.unwrap();
    stores.roles.delete_all().await.unwrap();
    stores.permissions.delete_all().await.unwrap();

    assert_eq!(stores.users.count().await.unwrap(), 0);
    assert!(stores
        .users
        .find_by_email(USER_EMAIL)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn service_authenticates_against_the_real_store() {
    let stores = fresh_stores().await;
    seed_admin(&stores).await;

    let service = Authenticator::new(
        Arc::new(UserStore::new(stores.db.get_connection())),
        Arc::new(Argon2Verifier),
    );

    let outcome = service.authenticate(USER_EMAIL, USER_SECRET).await.unwrap();
    assert!(matches!(outcome, AuthOutcome::Success(_)));

    let outcome = service
        .authenticate(USER_EMAIL, "wrong password")
        .await
        .unwrap();
    assert!(matches!(outcome, AuthOutcome::InvalidCredentials));
}
