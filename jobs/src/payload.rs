//! Inbound job payloads and their validation rules.

use entities::{Job, JobType};
use fields::FieldValidator;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;

pub const TITLE_LEN: (usize, usize) = (3, 100);
pub const DESCRIPTION_LEN: (usize, usize) = (10, 1000);
pub const COMPANY_LEN: (usize, usize) = (2, 100);
pub const LOCATION_LEN: (usize, usize) = (2, 100);
pub const SALARY_RANGE: (f64, f64) = (0.0, 1_000_000.0);

const TITLE_SIZE: &str = "Title must be between 3 and 100 characters";
const DESCRIPTION_SIZE: &str = "Description must be between 10 and 1000 characters";
const COMPANY_SIZE: &str = "Company name must be between 2 and 100 characters";
const LOCATION_SIZE: &str = "Location must be between 2 and 100 characters";
const SALARY_MIN: &str = "Salary must be positive";
const SALARY_MAX: &str = "Salary must be reasonable";

/// A new posting. Required fields are optional here so that missing ones
/// are reported per field by [`JobCreate::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub job_type: Option<JobType>,
}

impl JobCreate {
    pub fn validate(&self) -> Result<()> {
        let mut v = FieldValidator::new();
        v.not_blank("title", self.title.as_deref(), "Job title is required")
            .length("title", self.title.as_deref(), TITLE_LEN.0, TITLE_LEN.1, TITLE_SIZE)
            .not_blank(
                "description",
                self.description.as_deref(),
                "Job description is required",
            )
            .length(
                "description",
                self.description.as_deref(),
                DESCRIPTION_LEN.0,
                DESCRIPTION_LEN.1,
                DESCRIPTION_SIZE,
            )
            .not_blank("company", self.company.as_deref(), "Company name is required")
            .length(
                "company",
                self.company.as_deref(),
                COMPANY_LEN.0,
                COMPANY_LEN.1,
                COMPANY_SIZE,
            )
            .not_blank("location", self.location.as_deref(), "Location is required")
            .length(
                "location",
                self.location.as_deref(),
                LOCATION_LEN.0,
                LOCATION_LEN.1,
                LOCATION_SIZE,
            )
            .min("salary", self.salary, SALARY_RANGE.0, SALARY_MIN)
            .max("salary", self.salary, SALARY_RANGE.1, SALARY_MAX)
            .present("jobType", self.job_type.as_ref(), "Job type is required");
        v.finish()?;
        Ok(())
    }
}

/// A partial edit. Absent and `null` fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub job_type: Option<JobType>,
}

impl JobUpdate {
    /// Size and range checks for the fields that are present.
    pub fn validate(&self) -> Result<()> {
        let mut v = FieldValidator::new();
        v.length("title", self.title.as_deref(), TITLE_LEN.0, TITLE_LEN.1, TITLE_SIZE)
            .length(
                "description",
                self.description.as_deref(),
                DESCRIPTION_LEN.0,
                DESCRIPTION_LEN.1,
                DESCRIPTION_SIZE,
            )
            .length(
                "company",
                self.company.as_deref(),
                COMPANY_LEN.0,
                COMPANY_LEN.1,
                COMPANY_SIZE,
            )
            .length(
                "location",
                self.location.as_deref(),
                LOCATION_LEN.0,
                LOCATION_LEN.1,
                LOCATION_SIZE,
            )
            .min("salary", self.salary, SALARY_RANGE.0, SALARY_MIN)
            .max("salary", self.salary, SALARY_RANGE.1, SALARY_MAX);
        v.finish()?;
        Ok(())
    }

    /// Copy every present field onto `job`. Does not touch timestamps.
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(company) = &self.company {
            job.company = company.clone();
        }
        if let Some(location) = &self.location {
            job.location = location.clone();
        }
        if let Some(salary) = self.salary {
            job.salary = Some(salary);
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
    }
}
