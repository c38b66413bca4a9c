//! Administrator endpoints: user directory, role changes and job moderation.
//! The services reject non-administrators with 403, before any input is
//! validated.

use axum::{extract::State, http::StatusCode, Json};
use entities::{JobView, Role, UserView};
use tracing::info;
use user::UserStatistics;

use crate::{
    error::{ApiJson, ApiPath, ApiResult},
    extractors::CurrentUser,
    models::UserRoleUpdate,
    AppState,
};

/// List every user
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserView>),
        (status = 403, description = "Caller is not an administrator", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<UserView>>> {
    let users = state.users.admin().list_users(&caller).await?;
    Ok(Json(users.iter().map(|u| u.view()).collect()))
}

/// Read one user
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<UserView>> {
    let user = state.users.admin().get_user(&caller, id).await?;
    Ok(Json(user.view()))
}

/// Change a user's role
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserRoleUpdate,
    responses(
        (status = 200, description = "Role updated", body = UserView),
        (status = 400, description = "Role missing or unknown", body = crate::error::ApiErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_user_role(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<UserRoleUpdate>,
) -> ApiResult<Json<UserView>> {
    state.users.admin().ensure_admin(&caller)?;
    let role = update.required_role()?;
    let user = state.users.admin().set_role(&caller, id, role).await?;
    info!("User {} now has role {}", user.id, user.role);
    Ok(Json(user.view()))
}

/// Delete a user who owns no jobs
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse),
        (status = 409, description = "User still owns jobs", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.users.admin().delete_user(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Users holding one role
#[utoipa::path(
    get,
    path = "/api/admin/users/role/{role}",
    params(("role" = String, Path, description = "USER, EMPLOYER or ADMIN")),
    responses(
        (status = 200, description = "Users with the role", body = Vec<UserView>),
        (status = 400, description = "Unknown role", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_users_by_role(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(role): ApiPath<String>,
) -> ApiResult<Json<Vec<UserView>>> {
    state.users.admin().ensure_admin(&caller)?;
    let role: Role = role.parse()?;
    let users = state.users.admin().list_users_by_role(&caller, role).await?;
    Ok(Json(users.iter().map(|u| u.view()).collect()))
}

/// User counts per role
#[utoipa::path(
    get,
    path = "/api/admin/statistics/users",
    responses(
        (status = 200, description = "User counts", body = UserStatistics)
    ),
    tag = "admin"
)]
pub async fn user_statistics(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<UserStatistics>> {
    Ok(Json(state.users.admin().user_statistics(&caller).await?))
}

/// Read any job
#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job found", body = JobView),
        (status = 404, description = "Job not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn get_job(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<JobView>> {
    Ok(Json(state.jobs.admin_get_job(&caller, id).await?))
}

/// Remove any job regardless of owner
#[utoipa::path(
    delete,
    path = "/api/admin/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_job(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.jobs.admin_delete_job(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
