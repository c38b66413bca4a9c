//! Administrator-only user management.
//!
//! Every operation checks the caller before touching the store.

use authz::AuthzEngine;
use chrono::Utc;
use entities::{Role, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::{Result, UserError},
    store::{self, UserStore},
};

/// Account totals by role. The three role counts always add up to the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_users: i64,
    pub admin_users: i64,
    pub employer_users: i64,
    pub regular_users: i64,
}

#[derive(Clone)]
pub struct AdminService {
    store: UserStore,
    authz: Arc<AuthzEngine>,
}

impl AdminService {
    pub fn new(store: UserStore, authz: Arc<AuthzEngine>) -> Self {
        Self { store, authz }
    }

    /// Fails with `PermissionDenied` unless `caller` may manage users.
    pub fn ensure_admin(&self, caller: &User) -> Result<()> {
        if self.authz.can_manage_users(caller) {
            Ok(())
        } else {
            warn!("User {} denied user management", caller.id);
            Err(UserError::PermissionDenied(
                "Only administrators can manage users".to_string(),
            ))
        }
    }

    pub async fn list_users(&self, caller: &User) -> Result<Vec<User>> {
        self.ensure_admin(caller)?;
        info!("Listing all users");
        self.store.find_all().await
    }

    pub async fn get_user(&self, caller: &User, id: i64) -> Result<User> {
        self.ensure_admin(caller)?;
        info!("Fetching user {}", id);
        self.store
            .find_by_id(id)
            .await?
            .ok_or(UserError::UserNotFound(id))
    }

    /// Overwrite a user's role. Lookup and write share one transaction.
    pub async fn set_role(&self, caller: &User, id: i64, role: Role) -> Result<User> {
        self.ensure_admin(caller)?;
        info!("Setting role of user {} to {}", id, role);

        let mut tx = self.store.pool().begin().await?;
        let mut user = store::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(UserError::UserNotFound(id))?;

        let now = Utc::now();
        store::update_role(&mut *tx, id, role, now).await?;
        tx.commit().await?;

        user.role = role;
        user.updated_at = now;
        Ok(user)
    }

    /// Remove a user. Refused while the user still owns job postings.
    pub async fn delete_user(&self, caller: &User, id: i64) -> Result<()> {
        self.ensure_admin(caller)?;
        info!("Deleting user {}", id);

        let mut tx = self.store.pool().begin().await?;
        if store::fetch_by_id(&mut *tx, id).await?.is_none() {
            return Err(UserError::UserNotFound(id));
        }
        store::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    // Filters the full user list in memory.
    pub async fn list_users_by_role(&self, caller: &User, role: Role) -> Result<Vec<User>> {
        self.ensure_admin(caller)?;
        info!("Listing users with role {}", role);
        let users = self.store.find_all().await?;
        Ok(users.into_iter().filter(|u| u.role == role).collect())
    }

    pub async fn count_users(&self, caller: &User) -> Result<i64> {
        self.ensure_admin(caller)?;
        self.store.count().await
    }

    pub async fn count_users_by_role(&self, caller: &User, role: Role) -> Result<i64> {
        self.ensure_admin(caller)?;
        self.store.count_by_role(role).await
    }

    pub async fn user_statistics(&self, caller: &User) -> Result<UserStatistics> {
        self.ensure_admin(caller)?;
        info!("Computing user statistics");
        Ok(UserStatistics {
            total_users: self.store.count().await?,
            admin_users: self.store.count_by_role(Role::Admin).await?,
            employer_users: self.store.count_by_role(Role::Employer).await?,
            regular_users: self.store.count_by_role(Role::User).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewUser;
    use database::Database;
    use rstest::rstest;

    struct Fixture {
        admin: AdminService,
        store: UserStore,
        root: User,
    }

    async fn insert(store: &UserStore, email: &str, role: Role) -> User {
        store
            .insert(NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                first_name: "F".to_string(),
                last_name: "L".to_string(),
                role,
            })
            .await
            .unwrap()
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        let store = UserStore::new(db.get_pool());
        let root = insert(&store, "root@x.com", Role::Admin).await;
        let admin = AdminService::new(store.clone(), Arc::new(AuthzEngine::new().unwrap()));
        Fixture { admin, store, root }
    }

    #[rstest]
    #[case(Role::User)]
    #[case(Role::Employer)]
    #[tokio::test]
    async fn test_non_admins_are_denied(#[case] role: Role) {
        let f = fixture().await;
        let caller = insert(&f.store, "caller@x.com", role).await;

        assert!(matches!(
            f.admin.list_users(&caller).await,
            Err(UserError::PermissionDenied(_))
        ));
        // Denial comes before the lookup, even for missing ids.
        assert!(matches!(
            f.admin.get_user(&caller, 9999).await,
            Err(UserError::PermissionDenied(_))
        ));
        assert!(matches!(
            f.admin.delete_user(&caller, f.root.id).await,
            Err(UserError::PermissionDenied(_))
        ));
        assert!(matches!(
            f.admin.ensure_admin(&caller),
            Err(UserError::PermissionDenied(_))
        ));
        assert!(f.admin.ensure_admin(&f.root).is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let f = fixture().await;
        assert!(matches!(
            f.admin.get_user(&f.root, 9999).await,
            Err(UserError::UserNotFound(9999))
        ));
    }

    #[tokio::test]
    async fn test_set_role() {
        let f = fixture().await;
        let target = insert(&f.store, "t@x.com", Role::User).await;

        let updated = f.admin.set_role(&f.root, target.id, Role::Employer).await.unwrap();
        assert_eq!(updated.role, Role::Employer);
        assert!(updated.updated_at >= target.updated_at);

        let stored = f.admin.get_user(&f.root, target.id).await.unwrap();
        assert_eq!(stored.role, Role::Employer);

        assert!(matches!(
            f.admin.set_role(&f.root, 4242, Role::Admin).await,
            Err(UserError::UserNotFound(4242))
        ));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let f = fixture().await;
        let target = insert(&f.store, "t@x.com", Role::User).await;

        f.admin.delete_user(&f.root, target.id).await.unwrap();
        assert!(f.store.find_by_id(target.id).await.unwrap().is_none());

        assert!(matches!(
            f.admin.delete_user(&f.root, target.id).await,
            Err(UserError::UserNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_user_with_jobs_is_a_conflict() {
        let f = fixture().await;
        let employer = insert(&f.store, "e@x.com", Role::Employer).await;
        sqlx::query(
            "INSERT INTO jobs (title, description, company, location, job_type, created_by, created_at, updated_at)
             VALUES ('Engineer', 'Builds things', 'Acme', 'Remote', 'REMOTE', ?, datetime('now'), datetime('now'))",
        )
        .bind(employer.id)
        .execute(f.store.pool())
        .await
        .unwrap();

        assert!(matches!(
            f.admin.delete_user(&f.root, employer.id).await,
            Err(UserError::UserOwnsJobs(_))
        ));
        assert!(f.store.find_by_id(employer.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_role_listing_and_statistics() {
        let f = fixture().await;
        insert(&f.store, "u1@x.com", Role::User).await;
        insert(&f.store, "u2@x.com", Role::User).await;
        insert(&f.store, "e@x.com", Role::Employer).await;

        let regular = f.admin.list_users_by_role(&f.root, Role::User).await.unwrap();
        assert_eq!(regular.len(), 2);
        assert!(regular.iter().all(|u| u.role == Role::User));

        assert_eq!(f.admin.count_users(&f.root).await.unwrap(), 4);
        assert_eq!(
            f.admin.count_users_by_role(&f.root, Role::Employer).await.unwrap(),
            1
        );

        let stats = f.admin.user_statistics(&f.root).await.unwrap();
        assert_eq!(
            stats,
            UserStatistics {
                total_users: 4,
                admin_users: 1,
                employer_users: 1,
                regular_users: 2,
            }
        );
        assert_eq!(
            stats.admin_users + stats.employer_users + stats.regular_users,
            stats.total_users
        );
    }
}
