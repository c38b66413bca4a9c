//! # Jobs Crate
//!
//! The job catalog: storage of postings, the operations employers and
//! administrators perform on them, searches and statistics.
//!
//! Ownership rules are not encoded here; every mutating operation asks the
//! [`authz::AuthzEngine`] after the job has been looked up.

pub mod error;
pub mod payload;
pub mod service;
pub mod stats;
pub mod store;

pub use error::{JobError, Result};
pub use payload::{JobCreate, JobUpdate};
pub use service::JobCatalogService;
pub use stats::{CompanyStatistics, JobStatistics};
pub use store::{JobStore, NewJob};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;
    use entities::{JobType, Role, User};
    use sqlx::SqlitePool;

    use crate::store::NewJob;

    pub async fn insert_user(pool: &SqlitePool, email: &str, role: Role) -> User {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, created_at, updated_at)
             VALUES (?, 'hash', 'Test', 'User', ?, ?, ?)",
        )
        .bind(email)
        .bind(role.as_str())
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();

        User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_job(owner: i64, title: &str, company: &str, location: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: "A role worth applying for".to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary: Some(80000.0),
            job_type: JobType::FullTime,
            created_by: owner,
            created_at: Utc::now(),
        }
    }
}
