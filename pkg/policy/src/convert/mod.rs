//! Conversion between the internal authorization model and RBAC.
//!
//! Rule and role conversion is total. Binding and role-ref conversion can
//! fail on scope violations or unknown kinds; those errors are returned,
//! never corrected.

pub mod bindings;
pub mod roleref;
pub mod roles;
pub mod rules;
pub mod subjects;

pub use bindings::{
    cluster_role_binding_from_rbac, cluster_role_binding_to_rbac, role_binding_from_rbac,
    role_binding_to_rbac,
};
pub use roleref::{role_ref_from_rbac, role_ref_to_rbac};
pub use roles::{cluster_role_from_rbac, cluster_role_to_rbac, role_from_rbac, role_to_rbac};
pub use rules::{rule_from_rbac, rule_to_rbac, rules_from_rbac, rules_to_rbac};
pub use subjects::{subject_from_rbac, subject_to_rbac, subjects_from_rbac, subjects_to_rbac};

use crate::error::Result;
use pkg_types::policy::{AuthorizationPolicy, RbacPolicy};
use tracing::debug;

/// Convert a whole policy document to RBAC, stopping at the first invalid object.
pub fn policy_to_rbac(policy: &AuthorizationPolicy) -> Result<RbacPolicy> {
    let converted = RbacPolicy {
        roles: policy.roles.iter().map(role_to_rbac).collect(),
        cluster_roles: policy.cluster_roles.iter().map(cluster_role_to_rbac).collect(),
        role_bindings: policy
            .role_bindings
            .iter()
            .map(role_binding_to_rbac)
            .collect::<Result<_>>()?,
        cluster_role_bindings: policy
            .cluster_role_bindings
            .iter()
            .map(cluster_role_binding_to_rbac)
            .collect::<Result<_>>()?,
    };

    debug!(
        "Converted policy to RBAC: {} role(s), {} cluster role(s), {} role binding(s), {} cluster role binding(s)",
        converted.roles.len(),
        converted.cluster_roles.len(),
        converted.role_bindings.len(),
        converted.cluster_role_bindings.len()
    );
    Ok(converted)
}

/// Convert an RBAC policy document back, stopping at the first invalid object.
pub fn policy_from_rbac(policy: &RbacPolicy) -> Result<AuthorizationPolicy> {
    Ok(AuthorizationPolicy {
        roles: policy.roles.iter().map(role_from_rbac).collect(),
        cluster_roles: policy.cluster_roles.iter().map(cluster_role_from_rbac).collect(),
        role_bindings: policy
            .role_bindings
            .iter()
            .map(role_binding_from_rbac)
            .collect::<Result<_>>()?,
        cluster_role_bindings: policy
            .cluster_role_bindings
            .iter()
            .map(cluster_role_binding_from_rbac)
            .collect::<Result<_>>()?,
    })
}
