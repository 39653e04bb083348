use crate::meta::{AggregationRule, ObjectMeta};
use pkg_constants::auth::{
    GROUP_KIND, SERVICE_ACCOUNT_KIND, SYSTEM_GROUP_KIND, SYSTEM_USER_KIND, USER_KIND,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unordered string set. Order is only fixed when a set is listified for the wire.
pub type StringSet = HashSet<String>;

/// Build a [`StringSet`] from anything yielding string-likes.
pub fn string_set<I, S>(items: I) -> StringSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

// --- Attribute restrictions ---

/// Deprecated, opaque rule extension.
///
/// No authorizer ever evaluates it; it survives only so that legacy objects
/// decode. Conversion to the RBAC model discards any rule carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRestrictions(pub serde_json::Value);

impl AttributeRestrictions {
    /// The embedded object's `kind`, if it declares one.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(|k| k.as_str())
    }
}

// --- Policy rules ---

/// A grant of a set of verbs over resources or non-resource URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Verbs that apply to everything in this rule ("*" for all)
    #[serde(default)]
    pub verbs: StringSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_restrictions: Option<AttributeRestrictions>,
    /// API groups of the resources ("" for core, "*" for all)
    #[serde(default)]
    pub api_groups: Vec<String>,
    /// Resource types ("*" for all)
    #[serde(default)]
    pub resources: StringSet,
    /// Optional allow-list of object names; empty means any name
    #[serde(default)]
    pub resource_names: StringSet,
    /// Partial URLs; "*" is only allowed as the full final path step
    #[serde(default)]
    pub non_resource_urls: StringSet,
}

impl PolicyRule {
    /// True if any resource-shaped field is populated.
    pub fn is_resource_rule(&self) -> bool {
        !self.api_groups.is_empty() || !self.resources.is_empty() || !self.resource_names.is_empty()
    }

    pub fn is_non_resource_rule(&self) -> bool {
        !self.non_resource_urls.is_empty()
    }
}

// --- Subject ---

/// The closed set of internal subject kinds.
///
/// `SystemUser` and `SystemGroup` only exist in this model; RBAC collapses
/// them into plain `User` / `Group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    User,
    Group,
    ServiceAccount,
    SystemUser,
    SystemGroup,
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SubjectKind::User => USER_KIND,
            SubjectKind::Group => GROUP_KIND,
            SubjectKind::ServiceAccount => SERVICE_ACCOUNT_KIND,
            SubjectKind::SystemUser => SYSTEM_USER_KIND,
            SubjectKind::SystemGroup => SYSTEM_GROUP_KIND,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    pub kind: SubjectKind,
    pub name: String,
    /// Only meaningful for `ServiceAccount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Subject {
    pub fn new(kind: SubjectKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: None,
        }
    }

    pub fn service_account(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::ServiceAccount,
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }
}

// --- RoleRef ---

/// Name-based reference from a binding to a role.
///
/// An absent or empty namespace refers to a ClusterRole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl RoleRef {
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// The referenced namespace, with `Some("")` folded into `None`.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

// --- Roles ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterRole {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
    /// When set, `rules` are controller-managed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_rule: Option<AggregationRule>,
}

// --- Bindings ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub role_ref: RoleRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRoleBinding {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    pub role_ref: RoleRef,
}
