//! Demo accounts and job postings for development databases.

use entities::{JobType, Role, User};
use jobs::JobCreate;
use tracing::info;
use user::RegisterRequest;

use crate::{AppState, BoxError};

pub const DEMO_PASSWORD: &str = "password123";

struct DemoJob {
    title: &'static str,
    description: &'static str,
    company: &'static str,
    location: &'static str,
    salary: Option<f64>,
    job_type: JobType,
}

fn demo_users() -> Vec<(&'static str, &'static str, &'static str, Role)> {
    vec![
        ("admin@jobboard.local", "Ada", "Admin", Role::Admin),
        ("hiring@acme.example", "Erin", "Employer", Role::Employer),
        ("talent@globex.example", "Evan", "Recruiter", Role::Employer),
        ("seeker@jobboard.local", "Sam", "Seeker", Role::User),
    ]
}

fn demo_jobs() -> Vec<DemoJob> {
    vec![
        DemoJob {
            title: "Backend Engineer",
            description: "Build and operate the services behind our order pipeline.",
            company: "Acme",
            location: "Berlin, Germany",
            salary: Some(85000.0),
            job_type: JobType::FullTime,
        },
        DemoJob {
            title: "Support Specialist",
            description: "Answer customer questions and triage incoming tickets.",
            company: "Acme",
            location: "Remote",
            salary: None,
            job_type: JobType::PartTime,
        },
        DemoJob {
            title: "Data Engineering Intern",
            description: "Help maintain reporting pipelines for a summer term.",
            company: "Globex",
            location: "Springfield",
            salary: Some(2500.0),
            job_type: JobType::Internship,
        },
        DemoJob {
            title: "Frontend Contractor",
            description: "Six month engagement to rebuild the customer dashboard.",
            company: "Globex",
            location: "Remote",
            salary: Some(60000.0),
            job_type: JobType::Contract,
        },
    ]
}

/// Seed demo users and jobs. Does nothing unless the database has no users.
pub async fn init_test_data(state: &AppState) -> Result<(), BoxError> {
    if state.users.store().count().await? > 0 {
        info!("Database already has users, skipping demo data");
        return Ok(());
    }

    let mut employers: Vec<User> = Vec::new();
    for (email, first_name, last_name, role) in demo_users() {
        let (_, user) = state
            .users
            .auth()
            .register(RegisterRequest {
                email: Some(email.to_string()),
                password: Some(DEMO_PASSWORD.to_string()),
                first_name: Some(first_name.to_string()),
                last_name: Some(last_name.to_string()),
                role: Some(role),
            })
            .await?;
        if user.role == Role::Employer {
            employers.push(user);
        }
    }

    let mut created = 0;
    for (index, job) in demo_jobs().into_iter().enumerate() {
        let Some(owner) = employers.get(index / 2) else {
            break;
        };
        state
            .jobs
            .create(
                owner,
                JobCreate {
                    title: Some(job.title.to_string()),
                    description: Some(job.description.to_string()),
                    company: Some(job.company.to_string()),
                    location: Some(job.location.to_string()),
                    salary: job.salary,
                    job_type: Some(job.job_type),
                },
            )
            .await?;
        created += 1;
    }

    info!(
        "Seeded {} demo users and {} demo jobs (password: {})",
        demo_users().len(),
        created,
        DEMO_PASSWORD
    );
    Ok(())
}
