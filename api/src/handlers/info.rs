use axum::Json;

use crate::{
    error::{ApiQuery, ApiResult},
    middleware_hooks::API_VERSION,
    models::{InfoDetail, InfoQuery, InfoResponse},
};

pub const SERVICE_NAME: &str = "Job Board";
pub const SERVICE_DESCRIPTION: &str = "Backend API for managing job postings";

/// Static service metadata at the requested level of detail.
pub fn service_info(detail: InfoDetail) -> InfoResponse {
    let mut info = InfoResponse {
        name: SERVICE_NAME.to_string(),
        version: API_VERSION.to_string(),
        description: Some(SERVICE_DESCRIPTION.to_string()),
        developer: None,
        technology: None,
        status: None,
    };

    match detail {
        InfoDetail::Full => {
            info.developer = Some("Job Board Team".to_string());
            info.technology = Some("Rust, axum, SQLite".to_string());
            info.status = Some("Development".to_string());
        }
        InfoDetail::Brief => info.description = None,
        InfoDetail::Standard => {}
    }

    info
}

/// Service information
///
/// GET /api/info
#[utoipa::path(
    get,
    path = "/api/info",
    params(InfoQuery),
    responses(
        (status = 200, description = "Service metadata", body = InfoResponse)
    ),
    tag = "health"
)]
pub async fn get_info(ApiQuery(query): ApiQuery<InfoQuery>) -> ApiResult<Json<InfoResponse>> {
    Ok(Json(service_info(query.level())))
}
