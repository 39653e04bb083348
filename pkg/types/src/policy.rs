use crate::{authorization, rbac};
use serde::{Deserialize, Serialize};

/// A bundle of internal-model policy objects, as read from or written to a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<authorization::Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_roles: Vec<authorization::ClusterRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_bindings: Vec<authorization::RoleBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_role_bindings: Vec<authorization::ClusterRoleBinding>,
}

/// The same bundle in RBAC form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RbacPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<rbac::Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_roles: Vec<rbac::ClusterRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role_bindings: Vec<rbac::RoleBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_role_bindings: Vec<rbac::ClusterRoleBinding>,
}

impl AuthorizationPolicy {
    /// Stamp `namespace` on every role and role binding that has none.
    pub fn default_namespace(&mut self, namespace: &str) {
        for role in &mut self.roles {
            if role.metadata.namespace.is_empty() {
                role.metadata.namespace = namespace.to_string();
            }
        }
        for binding in &mut self.role_bindings {
            if binding.metadata.namespace.is_empty() {
                binding.metadata.namespace = namespace.to_string();
            }
        }
    }
}

impl RbacPolicy {
    /// Stamp `namespace` on every role and role binding that has none.
    pub fn default_namespace(&mut self, namespace: &str) {
        for role in &mut self.roles {
            if role.metadata.namespace.is_empty() {
                role.metadata.namespace = namespace.to_string();
            }
        }
        for binding in &mut self.role_bindings {
            if binding.metadata.namespace.is_empty() {
                binding.metadata.namespace = namespace.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ObjectMeta;

    #[test]
    fn default_namespace_only_fills_blanks() {
        let mut policy = AuthorizationPolicy {
            roles: vec![
                authorization::Role {
                    metadata: ObjectMeta::cluster("edit"),
                    rules: vec![],
                },
                authorization::Role {
                    metadata: ObjectMeta::namespaced("prod", "view"),
                    rules: vec![],
                },
            ],
            ..Default::default()
        };
        policy.default_namespace("dev");
        assert_eq!(policy.roles[0].metadata.namespace, "dev");
        assert_eq!(policy.roles[1].metadata.namespace, "prod");
    }

    #[test]
    fn empty_sections_are_optional() {
        let policy: RbacPolicy = serde_yaml::from_str("clusterRoles: []\n").unwrap();
        assert!(policy.roles.is_empty());
        assert!(policy.cluster_role_bindings.is_empty());
    }
}
