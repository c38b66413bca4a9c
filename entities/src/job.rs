use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::EntitiesError;

/// Kind of engagement offered by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
        JobType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
            JobType::Remote => "REMOTE",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = EntitiesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EntitiesError::UnknownJobType(s.to_string()))
    }
}

/// The user who posted a job. Only the id and email are carried along with
/// the job; the user row itself knows nothing about its postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub id: i64,
    pub email: String,
}

/// A job posting as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<f64>,
    pub job_type: JobType,
    pub creator: Creator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.creator.id == user_id
    }

    pub fn view(&self) -> JobView {
        JobView::from(self)
    }
}

/// Decodes a row selected with the creator's email joined in as
/// `creator_email`.
impl<'r> FromRow<'r, SqliteRow> for Job {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let job_type: String = row.try_get("job_type")?;
        let job_type = job_type
            .parse::<JobType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "job_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            company: row.try_get("company")?,
            location: row.try_get("location")?,
            salary: row.try_get("salary")?,
            job_type,
            creator: Creator {
                id: row.try_get("created_by")?,
                email: row.try_get("creator_email")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Public projection of a [`Job`]; the creator is reduced to their email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<f64>,
    pub job_type: JobType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: job.salary,
            job_type: job.job_type,
            created_at: job.created_at,
            updated_at: job.updated_at,
            created_by: job.creator.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_type_names() {
        let names: Vec<&str> = JobType::ALL.iter().map(JobType::as_str).collect();
        assert_eq!(
            names,
            vec!["FULL_TIME", "PART_TIME", "CONTRACT", "INTERNSHIP", "REMOTE"]
        );
        assert_eq!("part_time".parse::<JobType>().unwrap(), JobType::PartTime);
        assert_eq!(
            "FREELANCE".parse::<JobType>(),
            Err(EntitiesError::UnknownJobType("FREELANCE".to_string()))
        );
    }

    #[test]
    fn test_view_exposes_creator_email() {
        let now = Utc::now();
        let job = Job {
            id: 1,
            title: "Backend Engineer".to_string(),
            description: "Build and run the job board API".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: Some(90000.0),
            job_type: JobType::FullTime,
            creator: Creator {
                id: 3,
                email: "a@acme.com".to_string(),
            },
            created_at: now,
            updated_at: now,
        };

        assert!(job.is_owned_by(3));
        assert!(!job.is_owned_by(4));

        let json = serde_json::to_value(job.view()).unwrap();
        assert_eq!(json["createdBy"], "a@acme.com");
        assert_eq!(json["jobType"], "FULL_TIME");
        assert_eq!(json["salary"], 90000.0);
    }
}
