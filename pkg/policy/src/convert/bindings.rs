use crate::convert::roleref::{role_ref_from_rbac, role_ref_to_rbac};
use crate::convert::subjects::{subjects_from_rbac, subjects_to_rbac};
use crate::error::{PolicyError, Result};
use pkg_constants::auth::CLUSTER_ROLE_KIND;
use pkg_types::authorization::{ClusterRoleBinding, RoleBinding, RoleRef};
use pkg_types::rbac;
use tracing::debug;

/// Convert a namespaced role binding to RBAC.
///
/// The role ref may only name a cluster role or a role in the binding's own
/// namespace; anything else would grant a foreign namespace's role here.
pub fn role_binding_to_rbac(binding: &RoleBinding) -> Result<rbac::RoleBinding> {
    if let Some(role_namespace) = binding.role_ref.namespace() {
        if role_namespace != binding.metadata.namespace {
            return Err(PolicyError::CrossNamespaceRoleRef {
                binding: binding.metadata.name.clone(),
                role_namespace: role_namespace.to_string(),
                binding_namespace: binding.metadata.namespace.clone(),
            });
        }
    }

    Ok(rbac::RoleBinding {
        metadata: binding.metadata.clone(),
        subjects: subjects_to_rbac(&binding.subjects),
        role_ref: role_ref_to_rbac(&binding.role_ref),
    })
}

pub fn role_binding_from_rbac(binding: &rbac::RoleBinding) -> Result<RoleBinding> {
    let subjects = subjects_from_rbac(&binding.subjects)?;
    let role_ref = role_ref_from_rbac(&binding.role_ref, &binding.metadata.namespace)?;

    debug!(
        "Converted RBAC role binding {}/{} to role ref {:?}",
        binding.metadata.namespace, binding.metadata.name, role_ref
    );

    Ok(RoleBinding {
        metadata: binding.metadata.clone(),
        subjects,
        role_ref,
    })
}

/// Convert a cluster role binding to RBAC. Its role ref must be cluster-scoped.
pub fn cluster_role_binding_to_rbac(
    binding: &ClusterRoleBinding,
) -> Result<rbac::ClusterRoleBinding> {
    if let Some(role_namespace) = binding.role_ref.namespace() {
        return Err(PolicyError::ClusterBindingMustBeClusterScoped {
            binding: binding.metadata.name.clone(),
            role_namespace: role_namespace.to_string(),
        });
    }

    Ok(rbac::ClusterRoleBinding {
        metadata: binding.metadata.clone(),
        subjects: subjects_to_rbac(&binding.subjects),
        role_ref: role_ref_to_rbac(&binding.role_ref),
    })
}

/// Convert an RBAC cluster role binding back. Only `ClusterRole` refs are
/// accepted: a `Role` has no namespace to resolve against at cluster scope.
pub fn cluster_role_binding_from_rbac(
    binding: &rbac::ClusterRoleBinding,
) -> Result<ClusterRoleBinding> {
    let subjects = subjects_from_rbac(&binding.subjects)?;
    if binding.role_ref.kind != CLUSTER_ROLE_KIND {
        return Err(PolicyError::UnknownRoleRefKind {
            kind: binding.role_ref.kind.clone(),
            name: binding.role_ref.name.clone(),
        });
    }

    Ok(ClusterRoleBinding {
        metadata: binding.metadata.clone(),
        subjects,
        role_ref: RoleRef::cluster(&binding.role_ref.name),
    })
}
