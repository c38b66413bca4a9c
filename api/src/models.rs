use chrono::{DateTime, Utc};
use entities::Role;
use fields::FieldErrors;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// How much of the service metadata `/api/info` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InfoDetail {
    #[default]
    Standard,
    Full,
    Brief,
}

impl InfoDetail {
    /// Only the exact values `full` and `brief` select a level. Anything
    /// else, including a missing value, is the standard map.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("full") => InfoDetail::Full,
            Some("brief") => InfoDetail::Brief,
            _ => InfoDetail::Standard,
        }
    }
}

/// Service metadata returned by `/api/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InfoQuery {
    /// `full` adds team and status, `brief` drops the description.
    #[serde(default)]
    pub detail: Option<String>,
}

impl InfoQuery {
    pub fn level(&self) -> InfoDetail {
        InfoDetail::from_param(self.detail.as_deref())
    }
}

/// Body of `PUT /api/admin/users/{id}/role`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserRoleUpdate {
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserRoleUpdate {
    pub fn required_role(&self) -> Result<Role, ApiError> {
        self.role.ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("role", "Role is required");
            ApiError::Validation(errors)
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyQuery {
    pub company: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocationQuery {
    pub location: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct JobTypeQuery {
    /// One of FULL_TIME, PART_TIME, CONTRACT, INTERNSHIP, REMOTE.
    pub job_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_detail_levels() {
        let query: InfoQuery = serde_json::from_str(r#"{"detail":"full"}"#).unwrap();
        assert_eq!(query.level(), InfoDetail::Full);

        let query: InfoQuery = serde_json::from_str(r#"{"detail":"brief"}"#).unwrap();
        assert_eq!(query.level(), InfoDetail::Brief);

        let query: InfoQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.level(), InfoDetail::Standard);
    }

    #[test]
    fn test_unknown_info_detail_falls_back_to_standard() {
        for value in ["verbose", "FULL", "Brief", ""] {
            assert_eq!(InfoDetail::from_param(Some(value)), InfoDetail::Standard);
        }
    }

    #[test]
    fn test_role_update_requires_role() {
        let missing = UserRoleUpdate::default();
        match missing.required_role() {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors.messages("role"), ["Role is required"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let update: UserRoleUpdate = serde_json::from_str(r#"{"role":"EMPLOYER"}"#).unwrap();
        assert_eq!(update.required_role().unwrap(), Role::Employer);
    }
}
