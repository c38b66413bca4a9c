//! Password registration, login and the current-user lookup.

use axum::{extract::State, http::StatusCode, Json};
use entities::UserView;
use tracing::info;
use user::{AuthResponse, LoginRequest, RegisterRequest};

use crate::{
    error::{ApiJson, ApiResult},
    extractors::CurrentUser,
    AppState,
};

/// Register a new account
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    info!("Registration requested");

    let (token, user) = state.users.auth().register(request).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, &user))))
}

/// Log in with email and password
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (token, user) = state.users.auth().login(request).await?;
    Ok(Json(AuthResponse::new(token, &user)))
}

/// The authenticated caller
///
/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserView),
        (status = 401, description = "Not authenticated", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_user(CurrentUser(caller): CurrentUser) -> Json<UserView> {
    Json(caller.view())
}
