//! Cluster-native RBAC objects, as they appear on the wire.
//!
//! Every field is list- or string-typed; nothing here is validated on decode,
//! so `kind` strings may hold anything a client sent.

use crate::meta::{AggregationRule, ObjectMeta};
use serde::{Deserialize, Serialize};

// --- Policy rules ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// Allowed verbs (e.g., "get", "list", "create", "*" for all)
    pub verbs: Vec<String>,
    /// API groups this rule applies to (e.g., "" for core, "*" for all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_groups: Vec<String>,
    /// Resource types (e.g., "pods", "services", "*" for all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
    #[serde(
        default,
        rename = "nonResourceURLs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub non_resource_urls: Vec<String>,
}

// --- Role ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRole {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_rule: Option<AggregationRule>,
}

// --- Subject ---

/// A principal named by a binding. `kind` is "User", "Group" or
/// "ServiceAccount"; `api_group` is the RBAC group for users and groups and
/// empty for service accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_group: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

// --- RoleRef ---

/// Reference to a "Role" or "ClusterRole". There is no namespace field: a
/// Role always lives in the binding's own namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub api_group: String,
    pub kind: String,
    pub name: String,
}

// --- RoleBinding ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub role_ref: RoleRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub role_ref: RoleRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_rule_uses_rbac_field_names() {
        let rule = PolicyRule {
            verbs: vec!["get".to_string()],
            non_resource_urls: vec!["/healthz".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "verbs": ["get"], "nonResourceURLs": ["/healthz"] })
        );
    }

    #[test]
    fn decode_role_binding_yaml() {
        let yaml = r#"
metadata:
  name: edit-binding
  namespace: dev
subjects:
  - kind: User
    apiGroup: rbac.authorization.k8s.io
    name: alice
  - kind: ServiceAccount
    name: builder
    namespace: dev
roleRef:
  apiGroup: rbac.authorization.k8s.io
  kind: Role
  name: edit
"#;
        let binding: RoleBinding = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(binding.metadata.namespace, "dev");
        assert_eq!(binding.subjects.len(), 2);
        assert_eq!(binding.subjects[1].namespace, "dev");
        assert!(binding.subjects[1].api_group.is_empty());
        assert_eq!(binding.role_ref.kind, "Role");
    }
}
