//! Job catalog endpoints. Every route here requires an authenticated caller.

use axum::{extract::State, http::StatusCode, Json};
use entities::{JobType, JobView};
use jobs::{CompanyStatistics, JobCreate, JobStatistics, JobUpdate};
use tracing::debug;

use crate::{
    error::{ApiJson, ApiPath, ApiQuery, ApiResult},
    extractors::CurrentUser,
    models::{CompanyQuery, JobTypeQuery, LocationQuery, TitleQuery},
    AppState,
};

/// List all jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    responses(
        (status = 200, description = "All job postings", body = Vec<JobView>),
        (status = 401, description = "Not authenticated", body = crate::error::ApiErrorResponse)
    ),
    tag = "jobs"
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
) -> ApiResult<Json<Vec<JobView>>> {
    Ok(Json(state.jobs.list_all().await?))
}

/// Read a single job
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job found", body = JobView),
        (status = 404, description = "Job not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "jobs"
)]
pub async fn get_job(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<JobView>> {
    Ok(Json(state.jobs.get_by_id(id).await?))
}

/// Post a new job
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = JobCreate,
    responses(
        (status = 201, description = "Job created", body = JobView),
        (status = 400, description = "Invalid job data", body = crate::error::ApiErrorResponse),
        (status = 403, description = "Caller may not post jobs", body = crate::error::ApiErrorResponse)
    ),
    tag = "jobs"
)]
pub async fn create_job(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(payload): ApiJson<JobCreate>,
) -> ApiResult<(StatusCode, Json<JobView>)> {
    let job = state.jobs.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job owned by the caller
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    request_body = JobUpdate,
    responses(
        (status = 200, description = "Job updated", body = JobView),
        (status = 403, description = "Caller does not own the job", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Job not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "jobs"
)]
pub async fn update_job(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<JobUpdate>,
) -> ApiResult<Json<JobView>> {
    Ok(Json(state.jobs.update(&caller, id, changes).await?))
}

/// Delete a job owned by the caller
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 403, description = "Caller does not own the job", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Job not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "jobs"
)]
pub async fn delete_job(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.jobs.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Jobs posted by the caller
#[utoipa::path(
    get,
    path = "/api/jobs/my-jobs",
    responses(
        (status = 200, description = "The caller's job postings", body = Vec<JobView>)
    ),
    tag = "jobs"
)]
pub async fn my_jobs(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<Vec<JobView>>> {
    Ok(Json(state.jobs.list_mine(&caller).await?))
}

/// Jobs at exactly the given company
#[utoipa::path(
    get,
    path = "/api/jobs/search/company",
    params(CompanyQuery),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<JobView>),
        (status = 404, description = "No jobs for the company", body = crate::error::ApiErrorResponse)
    ),
    tag = "search"
)]
pub async fn search_by_company(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiQuery(query): ApiQuery<CompanyQuery>,
) -> ApiResult<Json<Vec<JobView>>> {
    debug!("Company search for {:?}", query.company);
    Ok(Json(state.jobs.search_by_company(&query.company).await?))
}

/// Jobs whose location contains the term, ignoring case
#[utoipa::path(
    get,
    path = "/api/jobs/search/location",
    params(LocationQuery),
    responses(
        (status = 200, description = "Matching jobs, possibly none", body = Vec<JobView>)
    ),
    tag = "search"
)]
pub async fn search_by_location(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiQuery(query): ApiQuery<LocationQuery>,
) -> ApiResult<Json<Vec<JobView>>> {
    debug!("Location search for {:?}", query.location);
    Ok(Json(state.jobs.search_by_location(&query.location).await?))
}

/// Jobs whose title contains the term, ignoring case
#[utoipa::path(
    get,
    path = "/api/jobs/search/title",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching jobs, possibly none", body = Vec<JobView>)
    ),
    tag = "search"
)]
pub async fn search_by_title(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiQuery(query): ApiQuery<TitleQuery>,
) -> ApiResult<Json<Vec<JobView>>> {
    debug!("Title search for {:?}", query.title);
    Ok(Json(state.jobs.search_by_title(&query.title).await?))
}

/// Jobs of one employment type
#[utoipa::path(
    get,
    path = "/api/jobs/search/job-type",
    params(JobTypeQuery),
    responses(
        (status = 200, description = "Matching jobs", body = Vec<JobView>),
        (status = 400, description = "Unknown job type", body = crate::error::ApiErrorResponse),
        (status = 404, description = "No jobs of the type", body = crate::error::ApiErrorResponse)
    ),
    tag = "search"
)]
pub async fn search_by_type(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiQuery(query): ApiQuery<JobTypeQuery>,
) -> ApiResult<Json<Vec<JobView>>> {
    let job_type: JobType = query.job_type.parse()?;
    Ok(Json(state.jobs.search_by_type(job_type).await?))
}

/// Job counts overall, per type and for the caller
#[utoipa::path(
    get,
    path = "/api/jobs/statistics/count",
    responses(
        (status = 200, description = "Job counts", body = JobStatistics)
    ),
    tag = "jobs"
)]
pub async fn job_statistics(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> ApiResult<Json<JobStatistics>> {
    Ok(Json(state.jobs.statistics(&caller).await?))
}

/// Jobs and their count for one company
#[utoipa::path(
    get,
    path = "/api/jobs/statistics/company/{company}",
    params(("company" = String, Path, description = "Exact company name")),
    responses(
        (status = 200, description = "Company statistics", body = CompanyStatistics)
    ),
    tag = "jobs"
)]
pub async fn company_statistics(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    ApiPath(company): ApiPath<String>,
) -> ApiResult<Json<CompanyStatistics>> {
    Ok(Json(state.jobs.company_statistics(&company).await?))
}
