//! Job catalog operations. The caller is always passed in explicitly.

use authz::AuthzEngine;
use chrono::Utc;
use entities::{Creator, Job, JobType, JobView, User};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{JobError, Result};
use crate::payload::{JobCreate, JobUpdate};
use crate::stats::{CompanyStatistics, JobStatistics};
use crate::store::{self, JobStore, NewJob};

fn views(jobs: Vec<Job>) -> Vec<JobView> {
    jobs.iter().map(JobView::from).collect()
}

#[derive(Clone)]
pub struct JobCatalogService {
    store: JobStore,
    authz: Arc<AuthzEngine>,
}

impl JobCatalogService {
    pub fn new(store: JobStore, authz: Arc<AuthzEngine>) -> Self {
        Self { store, authz }
    }

    pub async fn list_all(&self) -> Result<Vec<JobView>> {
        info!("Listing all jobs");
        Ok(views(self.store.find_all().await?))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<JobView> {
        info!("Fetching job {}", id);
        self.store
            .find_by_id(id)
            .await?
            .map(|job| job.view())
            .ok_or_else(|| JobError::job_not_found(id))
    }

    pub async fn list_mine(&self, caller: &User) -> Result<Vec<JobView>> {
        info!("Listing jobs created by user {}", caller.id);
        Ok(views(self.store.find_by_creator(caller.id).await?))
    }

    /// Post a job owned by `caller`.
    pub async fn create(&self, caller: &User, payload: JobCreate) -> Result<JobView> {
        info!("User {} creating job", caller.id);

        if !self.authz.can_create_job(caller) {
            warn!("User {} with role {} may not post jobs", caller.id, caller.role);
            return Err(JobError::Forbidden(
                "Only employers and administrators can post jobs".to_string(),
            ));
        }
        payload.validate()?;

        let now = Utc::now();
        let new_job = NewJob {
            title: payload.title.unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
            company: payload.company.unwrap_or_default(),
            location: payload.location.unwrap_or_default(),
            salary: payload.salary,
            job_type: payload.job_type.unwrap_or(JobType::FullTime),
            created_by: caller.id,
            created_at: now,
        };
        let id = self.store.insert(&new_job).await?;

        let job = Job {
            id,
            title: new_job.title,
            description: new_job.description,
            company: new_job.company,
            location: new_job.location,
            salary: new_job.salary,
            job_type: new_job.job_type,
            creator: Creator {
                id: caller.id,
                email: caller.email.clone(),
            },
            created_at: now,
            updated_at: now,
        };
        info!("Created job {}", id);
        Ok(job.view())
    }

    /// Apply a partial edit. Lookup, ownership check and write run in one
    /// transaction.
    pub async fn update(&self, caller: &User, id: i64, changes: JobUpdate) -> Result<JobView> {
        info!("User {} updating job {}", caller.id, id);

        let mut tx = self.store.pool().begin().await?;
        let mut job = store::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| JobError::job_not_found(id))?;

        if !self.authz.can_modify_job(caller, &job) {
            warn!("User {} may not update job {}", caller.id, id);
            return Err(JobError::Forbidden(
                "You can only update jobs you created".to_string(),
            ));
        }
        changes.validate()?;

        changes.apply_to(&mut job);
        job.updated_at = Utc::now();
        store::update(&mut *tx, &job).await?;
        tx.commit().await?;

        Ok(job.view())
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<()> {
        info!("User {} deleting job {}", caller.id, id);

        let mut tx = self.store.pool().begin().await?;
        let job = store::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| JobError::job_not_found(id))?;

        if !self.authz.can_modify_job(caller, &job) {
            warn!("User {} may not delete job {}", caller.id, id);
            return Err(JobError::Forbidden(
                "You can only delete jobs you created".to_string(),
            ));
        }

        store::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Exact company match. An empty result is NotFound.
    pub async fn search_by_company(&self, company: &str) -> Result<Vec<JobView>> {
        info!("Searching jobs by company");
        let jobs = self.store.find_by_company(company).await?;
        if jobs.is_empty() {
            return Err(JobError::NotFound(format!(
                "No jobs found for company: {}",
                company
            )));
        }
        Ok(views(jobs))
    }

    /// Case-insensitive substring match. An empty result is fine.
    pub async fn search_by_location(&self, location: &str) -> Result<Vec<JobView>> {
        info!("Searching jobs by location");
        Ok(views(self.store.find_by_location_containing(location).await?))
    }

    /// Case-insensitive substring match. An empty result is fine.
    pub async fn search_by_title(&self, title: &str) -> Result<Vec<JobView>> {
        info!("Searching jobs by title");
        Ok(views(self.store.find_by_title_containing(title).await?))
    }

    /// An empty result is NotFound.
    pub async fn search_by_type(&self, job_type: JobType) -> Result<Vec<JobView>> {
        info!("Searching jobs by type {}", job_type);
        let jobs = self.store.find_by_type(job_type).await?;
        if jobs.is_empty() {
            return Err(JobError::NotFound(format!(
                "No jobs found for job type: {}",
                job_type
            )));
        }
        Ok(views(jobs))
    }

    pub async fn statistics(&self, caller: &User) -> Result<JobStatistics> {
        info!("Computing job statistics for user {}", caller.id);
        Ok(JobStatistics {
            total_jobs: self.store.count().await?,
            full_time_jobs: self.store.count_by_type(JobType::FullTime).await?,
            part_time_jobs: self.store.count_by_type(JobType::PartTime).await?,
            contract_jobs: self.store.count_by_type(JobType::Contract).await?,
            internship_jobs: self.store.count_by_type(JobType::Internship).await?,
            remote_jobs: self.store.count_by_type(JobType::Remote).await?,
            my_jobs: self.store.count_by_creator(caller.id).await?,
        })
    }

    /// Never fails on an unknown company; it simply has no jobs.
    pub async fn company_statistics(&self, company: &str) -> Result<CompanyStatistics> {
        info!("Computing statistics for company");
        let jobs = views(self.store.find_by_company(company).await?);
        Ok(CompanyStatistics {
            company: company.to_string(),
            total_jobs: jobs.len() as i64,
            jobs,
        })
    }

    /// Administrator view of any job. The role is checked before the lookup.
    pub async fn admin_get_job(&self, caller: &User, id: i64) -> Result<JobView> {
        self.ensure_admin(caller)?;
        self.get_by_id(id).await
    }

    /// Administrator removal of any job regardless of owner.
    pub async fn admin_delete_job(&self, caller: &User, id: i64) -> Result<()> {
        self.ensure_admin(caller)?;
        info!("Administrator {} removing job {}", caller.id, id);

        let mut tx = self.store.pool().begin().await?;
        if store::fetch_by_id(&mut *tx, id).await?.is_none() {
            return Err(JobError::job_not_found(id));
        }
        store::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    fn ensure_admin(&self, caller: &User) -> Result<()> {
        if self.authz.can_manage_users(caller) {
            Ok(())
        } else {
            warn!("User {} denied job moderation", caller.id);
            Err(JobError::Forbidden(
                "Only administrators can moderate jobs".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::insert_user;
    use database::Database;
    use entities::Role;
    use rstest::rstest;

    struct Fixture {
        service: JobCatalogService,
        employer_a: User,
        employer_b: User,
        admin: User,
        regular: User,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().await.unwrap();
        let pool = db.get_pool();
        let employer_a = insert_user(&pool, "a@acme.com", Role::Employer).await;
        let employer_b = insert_user(&pool, "b@globex.com", Role::Employer).await;
        let admin = insert_user(&pool, "admin@board.com", Role::Admin).await;
        let regular = insert_user(&pool, "user@mail.com", Role::User).await;

        Fixture {
            service: JobCatalogService::new(
                JobStore::new(pool),
                Arc::new(AuthzEngine::new().unwrap()),
            ),
            employer_a,
            employer_b,
            admin,
            regular,
        }
    }

    fn payload(title: &str, company: &str, location: &str, job_type: JobType) -> JobCreate {
        JobCreate {
            title: Some(title.into()),
            description: Some("A role worth applying for".into()),
            company: Some(company.into()),
            location: Some(location.into()),
            salary: Some(90000.0),
            job_type: Some(job_type),
        }
    }

    #[tokio::test]
    async fn test_create_sets_creator_and_equal_timestamps() {
        let f = fixture().await;
        let job = f
            .service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        assert_eq!(job.created_by, "a@acme.com");
        assert_eq!(job.created_at, job.updated_at);

        let stored = f.service.get_by_id(job.id).await.unwrap();
        assert_eq!(stored, job);
    }

    #[rstest]
    #[case(Role::Employer, true)]
    #[case(Role::Admin, true)]
    #[case(Role::User, false)]
    #[tokio::test]
    async fn test_create_requires_posting_role(#[case] role: Role, #[case] allowed: bool) {
        let f = fixture().await;
        let caller = match role {
            Role::Employer => &f.employer_a,
            Role::Admin => &f.admin,
            Role::User => &f.regular,
        };

        let result = f
            .service
            .create(caller, payload("Engineer", "Acme", "Berlin", JobType::Remote))
            .await;
        assert_eq!(result.is_ok(), allowed);
        if !allowed {
            assert!(matches!(result, Err(JobError::Forbidden(_))));
        }
    }

    #[tokio::test]
    async fn test_create_validation_failure_persists_nothing() {
        let f = fixture().await;
        let err = f
            .service
            .create(&f.employer_a, JobCreate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Validation(ref errors) if errors.len() == 5));
        assert!(f.service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_ownership() {
        let f = fixture().await;
        let job = f
            .service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        let raise = JobUpdate {
            salary: Some(95000.0),
            ..Default::default()
        };

        let err = f
            .service
            .update(&f.employer_b, job.id, raise.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::Forbidden(_)));

        let updated = f.service.update(&f.admin, job.id, raise.clone()).await.unwrap();
        assert_eq!(updated.salary, Some(95000.0));
        assert_eq!(updated.title, "Engineer");
        assert_eq!(updated.created_by, "a@acme.com");
        assert_eq!(updated.created_at, job.created_at);
        assert!(updated.updated_at >= job.updated_at);

        let again = f.service.update(&f.employer_a, job.id, raise).await.unwrap();
        assert_eq!(again.salary, updated.salary);
        assert_eq!(again.title, updated.title);
    }

    #[tokio::test]
    async fn test_not_found_precedes_forbidden() {
        let f = fixture().await;
        let err = f
            .service
            .update(&f.regular, 404, JobUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::NotFound(_)));

        let err = f.service.delete(&f.regular, 404).await.unwrap_err();
        assert!(matches!(err, JobError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_present_fields() {
        let f = fixture().await;
        let job = f
            .service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        let err = f
            .service
            .update(
                &f.employer_a,
                job.id,
                JobUpdate {
                    salary: Some(-1.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::Validation(_)));
        assert_eq!(f.service.get_by_id(job.id).await.unwrap().salary, Some(90000.0));
    }

    #[tokio::test]
    async fn test_delete_ownership() {
        let f = fixture().await;
        let job = f
            .service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        assert!(matches!(
            f.service.delete(&f.employer_b, job.id).await,
            Err(JobError::Forbidden(_))
        ));
        f.service.delete(&f.employer_a, job.id).await.unwrap();
        assert!(matches!(
            f.service.get_by_id(job.id).await,
            Err(JobError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_empty_result_asymmetry() {
        let f = fixture().await;
        f.service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        assert!(matches!(
            f.service.search_by_company("Initech").await,
            Err(JobError::NotFound(_))
        ));
        assert!(matches!(
            f.service.search_by_type(JobType::Internship).await,
            Err(JobError::NotFound(_))
        ));
        assert!(f.service.search_by_location("Tokyo").await.unwrap().is_empty());
        assert!(f.service.search_by_title("Chef").await.unwrap().is_empty());

        assert_eq!(f.service.search_by_company("Acme").await.unwrap().len(), 1);
        assert_eq!(f.service.search_by_location("ber").await.unwrap().len(), 1);
        assert_eq!(f.service.search_by_title("engine").await.unwrap().len(), 1);
        assert_eq!(
            f.service.search_by_type(JobType::FullTime).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_statistics() {
        let f = fixture().await;
        for (caller, job_type) in [
            (&f.employer_a, JobType::FullTime),
            (&f.employer_a, JobType::Remote),
            (&f.employer_b, JobType::Remote),
            (&f.admin, JobType::Internship),
        ] {
            f.service
                .create(caller, payload("Engineer", "Acme", "Berlin", job_type))
                .await
                .unwrap();
        }

        let stats = f.service.statistics(&f.employer_a).await.unwrap();
        assert_eq!(
            stats,
            JobStatistics {
                total_jobs: 4,
                full_time_jobs: 1,
                part_time_jobs: 0,
                contract_jobs: 0,
                internship_jobs: 1,
                remote_jobs: 2,
                my_jobs: 2,
            }
        );
        assert_eq!(f.service.list_mine(&f.employer_b).await.unwrap().len(), 1);

        let acme = f.service.company_statistics("Acme").await.unwrap();
        assert_eq!(acme.total_jobs, 4);
        assert_eq!(acme.jobs.len(), 4);

        let nobody = f.service.company_statistics("Initech").await.unwrap();
        assert_eq!(nobody.total_jobs, 0);
        assert!(nobody.jobs.is_empty());
    }

    #[tokio::test]
    async fn test_admin_moderation() {
        let f = fixture().await;
        let job = f
            .service
            .create(&f.employer_a, payload("Engineer", "Acme", "Berlin", JobType::FullTime))
            .await
            .unwrap();

        // Non-admins are refused before the lookup.
        assert!(matches!(
            f.service.admin_get_job(&f.employer_a, 404).await,
            Err(JobError::Forbidden(_))
        ));
        assert!(matches!(
            f.service.admin_delete_job(&f.employer_a, job.id).await,
            Err(JobError::Forbidden(_))
        ));

        assert_eq!(f.service.admin_get_job(&f.admin, job.id).await.unwrap().id, job.id);
        f.service.admin_delete_job(&f.admin, job.id).await.unwrap();
        assert!(matches!(
            f.service.admin_delete_job(&f.admin, job.id).await,
            Err(JobError::NotFound(_))
        ));
    }
}
