//! Access to the `jobs` table. Every read joins the creator's email in.

use chrono::{DateTime, Utc};
use entities::{Job, JobType};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::Result;

const SELECT_JOB: &str = r#"
    SELECT j.id, j.title, j.description, j.company, j.location, j.salary, j.job_type,
           j.created_by, u.email AS creator_email, j.created_at, j.updated_at
    FROM jobs j
    JOIN users u ON u.id = j.created_by
"#;

/// Column values of a job about to be inserted.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<f64>,
    pub job_type: JobType,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct JobStore {
    pool: SqlitePool,
}

impl JobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Insert and return the new id. Both timestamps get `created_at`.
    pub async fn insert(&self, job: &NewJob) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, description, company, location, salary, job_type, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.job_type.as_str())
        .bind(job.created_by)
        .bind(job.created_at)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted job {}", id);
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Job>> {
        fetch_by_id(&self.pool, id).await
    }

    pub async fn find_all(&self) -> Result<Vec<Job>> {
        self.fetch_where("", None).await
    }

    pub async fn find_by_creator(&self, user_id: i64) -> Result<Vec<Job>> {
        let sql = format!("{} WHERE j.created_by = ? ORDER BY j.id", SELECT_JOB);
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    /// Exact, case-sensitive company match.
    pub async fn find_by_company(&self, company: &str) -> Result<Vec<Job>> {
        self.fetch_where("WHERE j.company = ?", Some(company)).await
    }

    /// Case-insensitive substring match on location. SQLite's `lower()` only
    /// folds ASCII, so the match runs on Unicode lowercase in Rust.
    pub async fn find_by_location_containing(&self, location: &str) -> Result<Vec<Job>> {
        let needle = location.to_lowercase();
        let jobs = self.find_all().await?;
        Ok(jobs
            .into_iter()
            .filter(|j| j.location.to_lowercase().contains(&needle))
            .collect())
    }

    /// Case-insensitive substring match on title.
    pub async fn find_by_title_containing(&self, title: &str) -> Result<Vec<Job>> {
        let needle = title.to_lowercase();
        let jobs = self.find_all().await?;
        Ok(jobs
            .into_iter()
            .filter(|j| j.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn find_by_type(&self, job_type: JobType) -> Result<Vec<Job>> {
        self.fetch_where("WHERE j.job_type = ?", Some(job_type.as_str()))
            .await
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_type(&self, job_type: JobType) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE job_type = ?")
            .bind(job_type.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_creator(&self, user_id: i64) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE created_by = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_where(&self, filter: &str, arg: Option<&str>) -> Result<Vec<Job>> {
        let sql = format!("{} {} ORDER BY j.id", SELECT_JOB, filter);
        debug!("Job query: {}", filter);
        let mut query = sqlx::query_as::<_, Job>(&sql);
        if let Some(arg) = arg {
            query = query.bind(arg);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

/// Load a job through any executor, so lookups can share a transaction.
pub async fn fetch_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Job>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{} WHERE j.id = ?", SELECT_JOB);
    let job = sqlx::query_as::<_, Job>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(job)
}

/// Write every mutable column of `job`. The creator and `created_at` are
/// never rewritten.
pub async fn update<'e, E>(executor: E, job: &Job) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE jobs
        SET title = ?, description = ?, company = ?, location = ?, salary = ?, job_type = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.company)
    .bind(&job.location)
    .bind(job.salary)
    .bind(job.job_type.as_str())
    .bind(job.updated_at)
    .bind(job.id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
