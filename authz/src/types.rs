//! Principal, action and resource descriptions handed to the Cedar engine.
//!
//! Every value here is built from data the caller already loaded and
//! authenticated: the principal from a fresh user row, the resource from a
//! job that was looked up before the check. Attribute names line up with the
//! ones referenced by [`crate::policies::POLICY_SRC`].

use entities::{Job, User};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The "who" of a request. Users carry their numeric id as `uid` and their
/// role name as `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub entity_type: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl Principal {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            attrs: Map::new(),
        }
    }

    pub fn from_user(user: &User) -> Self {
        let mut principal = Self::new(user.id.to_string(), "User");
        principal.attrs.insert("uid".into(), json!(user.id));
        principal.attrs.insert("role".into(), json!(user.role.as_str()));
        principal
    }
}

/// The "what" of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn create_job() -> Self {
        Self::new("create_job")
    }

    /// Covers both editing and deleting a posting.
    pub fn modify_job() -> Self {
        Self::new("modify_job")
    }

    pub fn manage_users() -> Self {
        Self::new("manage_users")
    }

    pub fn all() -> [Action; 3] {
        [Self::create_job(), Self::modify_job(), Self::manage_users()]
    }
}

/// The "which" of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub entity_type: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
}

impl Resource {
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            attrs: Map::new(),
        }
    }

    /// An existing posting, owned by its creator.
    pub fn job(job: &Job) -> Self {
        let mut resource = Self::new(job.id.to_string(), "Job");
        resource.attrs.insert("owner".into(), json!(job.creator.id));
        resource
    }

    /// Target of job creation, before any posting exists.
    pub fn job_board() -> Self {
        Self::new("board", "JobBoard")
    }

    /// Target of user administration.
    pub fn user_directory() -> Self {
        Self::new("directory", "UserDirectory")
    }
}
