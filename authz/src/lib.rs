//! Cedar-based authorization for the job board.
//!
//! Decisions are made by evaluating a static policy set (see [`policies`])
//! against a principal built from the caller's user row and a resource built
//! from the job or collection being acted on. The capability helpers
//! ([`AuthzEngine::can_create_job`], [`AuthzEngine::can_modify_job`],
//! [`AuthzEngine::can_manage_users`]) collapse every failure into a deny, so
//! callers only ever see `true` or `false`.
//!
//! Lookups happen before authorization: services load the job first and only
//! then ask whether the caller may touch it, which keeps NotFound ahead of
//! Forbidden.

pub mod error;
pub mod policies;
pub mod types;

use cedar_policy::{
    Authorizer, Context, Decision, Entities, EntityId, EntityTypeName, EntityUid, PolicySet,
    Request,
};
use entities::{Job, User};
pub use error::{AuthzError, Result};
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::{debug, warn};
use types::{Action, Principal, Resource};

/// Evaluates authorization requests against the job board policy set.
///
/// The policy text is parsed once at construction; each request builds a
/// small entity store holding just the principal, the resource and the
/// known actions.
pub struct AuthzEngine {
    authorizer: Authorizer,
    policies: PolicySet,
}

impl AuthzEngine {
    /// Parses the built-in policy set.
    pub fn new() -> Result<Self> {
        Self::with_policies(policies::POLICY_SRC)
    }

    /// Builds an engine from arbitrary Cedar policy text.
    pub fn with_policies(policy_src: &str) -> Result<Self> {
        let policies =
            PolicySet::from_str(policy_src).map_err(|e| AuthzError::PolicyParse(e.to_string()))?;

        Ok(Self {
            authorizer: Authorizer::new(),
            policies,
        })
    }

    /// Whether `caller` may post a new job.
    pub fn can_create_job(&self, caller: &User) -> bool {
        self.decide(
            &Principal::from_user(caller),
            &Action::create_job(),
            &Resource::job_board(),
        )
    }

    /// Whether `caller` may edit or delete `job`.
    pub fn can_modify_job(&self, caller: &User, job: &Job) -> bool {
        self.decide(
            &Principal::from_user(caller),
            &Action::modify_job(),
            &Resource::job(job),
        )
    }

    /// Whether `caller` may administer user accounts.
    pub fn can_manage_users(&self, caller: &User) -> bool {
        self.decide(
            &Principal::from_user(caller),
            &Action::manage_users(),
            &Resource::user_directory(),
        )
    }

    /// Evaluate a request. `Ok(false)` means no policy permitted it.
    pub fn is_authorized(
        &self,
        principal: &Principal,
        action: &Action,
        resource: &Resource,
    ) -> Result<bool> {
        let entities = self.build_entities(principal, resource)?;
        let request = self.build_cedar_request(principal, action, resource)?;

        let response = self
            .authorizer
            .is_authorized(&request, &self.policies, &entities);

        let errors: Vec<String> = response
            .diagnostics()
            .errors()
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            debug!(
                "Policy evaluation errors for {} on {}::{}: {}",
                action.name,
                resource.entity_type,
                resource.id,
                errors.join("; ")
            );
        }

        Ok(response.decision() == Decision::Allow)
    }

    // Any failure to evaluate is a deny.
    fn decide(&self, principal: &Principal, action: &Action, resource: &Resource) -> bool {
        match self.is_authorized(principal, action, resource) {
            Ok(true) => true,
            Ok(false) => {
                debug!(
                    "Denied {} for {}::{} on {}::{}",
                    action.name,
                    principal.entity_type,
                    principal.id,
                    resource.entity_type,
                    resource.id
                );
                false
            }
            Err(e) => {
                warn!("Authorization check for {} failed: {}", action.name, e);
                false
            }
        }
    }

    fn build_entities(&self, principal: &Principal, resource: &Resource) -> Result<Entities> {
        let mut records = vec![
            json!({
                "uid": { "type": principal.entity_type, "id": principal.id },
                "attrs": Value::Object(principal.attrs.clone()),
                "parents": []
            }),
            json!({
                "uid": { "type": resource.entity_type, "id": resource.id },
                "attrs": Value::Object(resource.attrs.clone()),
                "parents": []
            }),
        ];
        for action in Action::all() {
            records.push(json!({
                "uid": { "type": "Action", "id": action.name },
                "attrs": {},
                "parents": []
            }));
        }

        Entities::from_json_value(Value::Array(records), None)
            .map_err(|e| AuthzError::EntityCreation(e.to_string()))
    }

    fn build_cedar_request(
        &self,
        principal: &Principal,
        action: &Action,
        resource: &Resource,
    ) -> Result<Request> {
        let principal_uid = EntityUid::from_type_name_and_id(
            EntityTypeName::from_str(&principal.entity_type).map_err(|e| {
                AuthzError::EntityCreation(format!("Invalid principal type: {}", e))
            })?,
            EntityId::new(&principal.id),
        );

        let action_uid = EntityUid::from_type_name_and_id(
            EntityTypeName::from_str("Action")
                .map_err(|e| AuthzError::EntityCreation(format!("Invalid action type: {}", e)))?,
            EntityId::new(&action.name),
        );

        let resource_uid = EntityUid::from_type_name_and_id(
            EntityTypeName::from_str(&resource.entity_type)
                .map_err(|e| AuthzError::EntityCreation(format!("Invalid resource type: {}", e)))?,
            EntityId::new(&resource.id),
        );

        Request::new(
            Some(principal_uid),
            Some(action_uid),
            Some(resource_uid),
            Context::empty(),
            None,
        )
        .map_err(|e| AuthzError::EvaluationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use entities::{Creator, JobType, Role};
    use rstest::rstest;

    fn user(id: i64, role: Role) -> User {
        let now = Utc::now();
        User {
            id,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            first_name: "Test".into(),
            last_name: "User".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    fn job_owned_by(owner: i64) -> Job {
        let now = Utc::now();
        Job {
            id: 100,
            title: "Engineer".into(),
            description: "Builds things".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: Some(50000.0),
            job_type: JobType::FullTime,
            creator: Creator {
                id: owner,
                email: format!("user{}@example.com", owner),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_policy_parsing() {
        assert!(AuthzEngine::new().is_ok());
        assert!(matches!(
            AuthzEngine::with_policies("permit(principal, action resource);"),
            Err(AuthzError::PolicyParse(_))
        ));
    }

    #[rstest]
    #[case(Role::User, false)]
    #[case(Role::Employer, true)]
    #[case(Role::Admin, true)]
    fn test_can_create_job(#[case] role: Role, #[case] expected: bool) {
        let engine = AuthzEngine::new().unwrap();
        assert_eq!(engine.can_create_job(&user(1, role)), expected);
    }

    #[rstest]
    #[case(Role::Employer, 1, true)]
    #[case(Role::Employer, 2, false)]
    #[case(Role::User, 1, true)]
    #[case(Role::User, 2, false)]
    #[case(Role::Admin, 2, true)]
    fn test_can_modify_job(#[case] role: Role, #[case] owner: i64, #[case] expected: bool) {
        let engine = AuthzEngine::new().unwrap();
        let caller = user(1, role);
        assert_eq!(engine.can_modify_job(&caller, &job_owned_by(owner)), expected);
    }

    #[rstest]
    #[case(Role::User, false)]
    #[case(Role::Employer, false)]
    #[case(Role::Admin, true)]
    fn test_can_manage_users(#[case] role: Role, #[case] expected: bool) {
        let engine = AuthzEngine::new().unwrap();
        assert_eq!(engine.can_manage_users(&user(5, role)), expected);
    }

    #[test]
    fn test_missing_attributes_deny() {
        let engine = AuthzEngine::new().unwrap();
        let bare = Principal::new("7", "User");

        let allowed = engine
            .is_authorized(&bare, &Action::create_job(), &Resource::job_board())
            .unwrap();
        assert!(!allowed);
    }

    #[test]
    fn test_unknown_action_is_denied() {
        let engine = AuthzEngine::new().unwrap();
        let admin = Principal::from_user(&user(1, Role::Admin));

        let allowed = engine
            .is_authorized(&admin, &Action::new("drop_tables"), &Resource::job_board())
            .unwrap();
        assert!(!allowed);
    }

    #[test]
    fn test_invalid_entity_type_is_an_error() {
        let engine = AuthzEngine::new().unwrap();
        let principal = Principal::new("1", "not a type");

        let result = engine.is_authorized(&principal, &Action::create_job(), &Resource::job_board());
        assert!(result.is_err());
    }
}
