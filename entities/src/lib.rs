//! Domain model shared by every layer of the job board: users with their
//! roles, job postings with their types, and the read-only views exposed
//! over the API.

pub mod error;
pub mod job;
pub mod user;

pub use error::{EntitiesError, Result};
pub use job::{Creator, Job, JobType, JobView};
pub use user::{Role, User, UserView};
