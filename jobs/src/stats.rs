use entities::JobView;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Job counts by type, plus the caller's own postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    pub total_jobs: i64,
    pub full_time_jobs: i64,
    pub part_time_jobs: i64,
    pub contract_jobs: i64,
    pub internship_jobs: i64,
    pub remote_jobs: i64,
    pub my_jobs: i64,
}

/// All postings of one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStatistics {
    pub company: String,
    pub total_jobs: i64,
    pub jobs: Vec<JobView>,
}
