use crate::error::{PolicyError, Result};
use pkg_constants::auth::{CLUSTER_ROLE_KIND, RBAC_GROUP_NAME, ROLE_KIND};
use pkg_types::authorization::RoleRef;
use pkg_types::rbac;

/// Convert a role ref to RBAC. The scope is inferred from the namespace:
/// none means a ClusterRole, anything else a Role.
pub fn role_ref_to_rbac(role_ref: &RoleRef) -> rbac::RoleRef {
    let kind = match role_ref.namespace() {
        Some(_) => ROLE_KIND,
        None => CLUSTER_ROLE_KIND,
    };
    rbac::RoleRef {
        api_group: RBAC_GROUP_NAME.to_string(),
        kind: kind.to_string(),
        name: role_ref.name.clone(),
    }
}

/// Convert an RBAC role ref back. A Role always resolves to the binding's
/// own namespace, so a Role ref from a binding without one is rejected.
pub fn role_ref_from_rbac(role_ref: &rbac::RoleRef, binding_namespace: &str) -> Result<RoleRef> {
    match role_ref.kind.as_str() {
        CLUSTER_ROLE_KIND => Ok(RoleRef::cluster(&role_ref.name)),
        ROLE_KIND if !binding_namespace.is_empty() => {
            Ok(RoleRef::namespaced(binding_namespace, &role_ref.name))
        }
        other => Err(PolicyError::UnknownRoleRefKind {
            kind: other.to_string(),
            name: role_ref.name.clone(),
        }),
    }
}
