use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware_hooks;
pub mod models;
pub mod server;
pub mod test_data;


use authz::AuthzEngine;
use database::Database;
use jobs::{JobCatalogService, JobStore};
use user::{
    auth::{PasswordHasher, TokenConfig},
    UserManager,
};

// Re-export server functions for convenience
pub use server::{shutdown_signal, start_server_with_config, ApiConfig};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub users: Arc<UserManager>,
    pub jobs: Arc<JobCatalogService>,
}

impl AppState {
    /// Wire the services over one database with a single policy engine.
    pub fn new(
        db: Arc<Database>,
        hasher: PasswordHasher,
        token_config: &TokenConfig,
    ) -> Result<Self, BoxError> {
        let authz = Arc::new(AuthzEngine::new()?);
        let users = UserManager::new(db.get_pool(), authz.clone(), hasher, token_config)?;
        let jobs = JobCatalogService::new(JobStore::new(db.get_pool()), authz);

        Ok(Self {
            db,
            users: Arc::new(users),
            jobs: Arc::new(jobs),
        })
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_current_user,
        handlers::jobs::list_jobs,
        handlers::jobs::get_job,
        handlers::jobs::create_job,
        handlers::jobs::update_job,
        handlers::jobs::delete_job,
        handlers::jobs::my_jobs,
        handlers::jobs::search_by_company,
        handlers::jobs::search_by_location,
        handlers::jobs::search_by_title,
        handlers::jobs::search_by_type,
        handlers::jobs::job_statistics,
        handlers::jobs::company_statistics,
        handlers::admin::list_users,
        handlers::admin::get_user,
        handlers::admin::update_user_role,
        handlers::admin::delete_user,
        handlers::admin::list_users_by_role,
        handlers::admin::user_statistics,
        handlers::admin::get_job,
        handlers::admin::delete_job,
        handlers::health::health_check,
        handlers::info::get_info,
    ),
    components(
        schemas(
            entities::Role,
            entities::JobType,
            entities::UserView,
            entities::JobView,
            user::RegisterRequest,
            user::LoginRequest,
            user::AuthResponse,
            user::UserStatistics,
            jobs::JobCreate,
            jobs::JobUpdate,
            jobs::JobStatistics,
            jobs::CompanyStatistics,
            models::HealthResponse,
            models::InfoResponse,
            models::UserRoleUpdate,
            error::ApiErrorResponse,
            error::ErrorDetail,
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "jobs", description = "Job posting operations"),
        (name = "search", description = "Job search"),
        (name = "admin", description = "Administrator operations"),
        (name = "health", description = "Health and service information"),
    ),
    info(
        title = "Job Board API",
        version = "1.0.0",
        description = "Backend API for managing job postings",
        contact(
            name = "Job Board Team",
        ),
    ),
)]
pub struct ApiDoc;

/// Create the main API router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let auth = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::get_current_user));

    let jobs = Router::new()
        .route(
            "/",
            get(handlers::jobs::list_jobs).post(handlers::jobs::create_job),
        )
        .route("/my-jobs", get(handlers::jobs::my_jobs))
        .route(
            "/:id",
            get(handlers::jobs::get_job)
                .put(handlers::jobs::update_job)
                .delete(handlers::jobs::delete_job),
        )
        .route("/search/company", get(handlers::jobs::search_by_company))
        .route("/search/location", get(handlers::jobs::search_by_location))
        .route("/search/title", get(handlers::jobs::search_by_title))
        .route("/search/job-type", get(handlers::jobs::search_by_type))
        .route("/statistics/count", get(handlers::jobs::job_statistics))
        .route(
            "/statistics/company/:company",
            get(handlers::jobs::company_statistics),
        );

    let admin = Router::new()
        .route("/users", get(handlers::admin::list_users))
        .route(
            "/users/:id",
            get(handlers::admin::get_user).delete(handlers::admin::delete_user),
        )
        .route("/users/:id/role", put(handlers::admin::update_user_role))
        .route("/users/role/:role", get(handlers::admin::list_users_by_role))
        .route("/statistics/users", get(handlers::admin::user_statistics))
        .route(
            "/jobs/:id",
            get(handlers::admin::get_job).delete(handlers::admin::delete_job),
        );

    let api = Router::new()
        .nest("/auth", auth)
        .nest("/jobs", jobs)
        .nest("/admin", admin)
        .route("/info", get(handlers::info::get_info));

    // Main router
    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health::health_check))
        .merge(SwaggerUi::new("/api/swagger").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(middleware_hooks::request_middleware))
        .layer(middleware::from_fn(middleware_hooks::response_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
