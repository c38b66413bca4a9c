//! The static policy set of the job board.
//!
//! Roles are plain strings on the principal, so adding a role only means
//! touching the text below.

pub const POLICY_SRC: &str = r#"
// Employers and administrators may post jobs.
permit(
    principal,
    action == Action::"create_job",
    resource
) when {
    principal.role == "EMPLOYER" || principal.role == "ADMIN"
};

// The creator of a job may edit or delete it.
permit(
    principal,
    action == Action::"modify_job",
    resource
) when {
    resource has owner && resource.owner == principal.uid
};

// Administrators may act on any job and any user.
permit(
    principal,
    action in [Action::"modify_job", Action::"manage_users"],
    resource
) when {
    principal.role == "ADMIN"
};
"#;
