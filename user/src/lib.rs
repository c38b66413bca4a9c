pub mod admin;
pub mod auth;
pub mod error;
pub mod store;

use authz::AuthzEngine;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use admin::AdminService;
use auth::{AuthService, PasswordHasher, TokenConfig, TokenManager};
use store::UserStore;

/// User management: identity store, authentication and administration
/// sharing one pool.
#[derive(Clone)]
pub struct UserManager {
    store: UserStore,
    auth: AuthService,
    admin: AdminService,
}

impl UserManager {
    pub fn new(
        pool: SqlitePool,
        authz: Arc<AuthzEngine>,
        hasher: PasswordHasher,
        token_config: &TokenConfig,
    ) -> error::Result<Self> {
        info!("Initializing user management");

        let store = UserStore::new(pool);
        let tokens = TokenManager::new(token_config)?;

        Ok(Self {
            auth: AuthService::new(store.clone(), hasher, tokens),
            admin: AdminService::new(store.clone(), authz),
            store,
        })
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }
}

// Re-export commonly used types
pub use admin::UserStatistics;
pub use auth::types::{AuthResponse, LoginRequest, RegisterRequest};
pub use auth::PasswordConfig;
pub use error::{Result as UserResult, UserError};
pub use store::NewUser;
