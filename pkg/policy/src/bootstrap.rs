//! Built-in cluster roles and bindings.
//!
//! Every rule is constructed through [`PolicyRuleBuilder`], so a malformed
//! built-in rule surfaces as an error at load time instead of shipping.

use crate::error::Result;
use crate::rule::PolicyRuleBuilder;
use crate::subject::{SystemServiceAccounts, build_subjects};
use pkg_constants::auth::{
    API_GROUP_ALL, AUTHENTICATED_GROUP, AUTHORIZATION_GROUP_NAME, BASIC_USER_BINDING_NAME,
    BASIC_USER_ROLE_NAME, CLUSTER_ADMIN_BINDING_NAME, CLUSTER_ADMIN_ROLE_NAME,
    DISCOVERY_BINDING_NAME, DISCOVERY_ROLE_NAME, MASTERS_GROUP, METRICS_READER_ROLE_NAME,
    NON_RESOURCE_ALL, PROJECT_GROUP_NAME, RBAC_GROUP_NAME, RESERVED_CURRENT_USER, RESOURCE_ALL,
    ROLE_SYSTEM_ONLY_ANNOTATION, SYSTEM_ADMIN_USERNAME, UNAUTHENTICATED_GROUP, USER_GROUP_NAME,
    VERB_ALL,
};
use pkg_types::authorization::{ClusterRole, ClusterRoleBinding, PolicyRule, RoleRef};
use pkg_types::meta::ObjectMeta;
use pkg_types::policy::AuthorizationPolicy;
use tracing::debug;

/// Paths any client may `get` to discover the API surface.
pub const DISCOVERY_URLS: &[&str] = &[
    // Server version checking
    "/version",
    "/version/*",
    // API discovery/negotiation
    "/api",
    "/api/*",
    "/apis",
    "/apis/*",
    "/oapi",
    "/oapi/*",
    "/openapi/v2",
    "/swaggerapi",
    "/swaggerapi/*",
    "/swagger.json",
    "/swagger-2.0.0.pb-v1",
    "/osapi",
    "/osapi/",
    "/.well-known",
    "/.well-known/*",
    "/",
];

/// Paths exposing server metrics and profiling.
pub const METRICS_URLS: &[&str] = &["/metrics", "/debug/pprof", "/debug/pprof/*"];

const READ: [&str; 3] = ["get", "list", "watch"];

/// Loader for the built-in policy. The URL tables are passed in rather than
/// read from globals, so callers can narrow or extend them.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapPolicy<'a> {
    discovery_urls: &'a [&'a str],
    metrics_urls: &'a [&'a str],
}

impl Default for BootstrapPolicy<'static> {
    fn default() -> Self {
        Self::new(DISCOVERY_URLS, METRICS_URLS)
    }
}

impl<'a> BootstrapPolicy<'a> {
    pub fn new(discovery_urls: &'a [&'a str], metrics_urls: &'a [&'a str]) -> Self {
        Self {
            discovery_urls,
            metrics_urls,
        }
    }

    /// The rule granting `get` on every discovery path.
    pub fn discovery_rule(&self) -> Result<PolicyRule> {
        PolicyRuleBuilder::new(["get"])
            .urls(self.discovery_urls.iter().copied())
            .build()
    }

    pub fn cluster_roles(&self) -> Result<Vec<ClusterRole>> {
        let system_only = |name: &str| {
            ObjectMeta::cluster(name).with_annotation(ROLE_SYSTEM_ONLY_ANNOTATION, "true")
        };

        let roles = vec![
            ClusterRole {
                metadata: ObjectMeta::cluster(CLUSTER_ADMIN_ROLE_NAME),
                rules: vec![
                    PolicyRuleBuilder::new([VERB_ALL])
                        .groups([API_GROUP_ALL])
                        .resources([RESOURCE_ALL])
                        .build()?,
                    PolicyRuleBuilder::new([VERB_ALL])
                        .urls([NON_RESOURCE_ALL])
                        .build()?,
                ],
                aggregation_rule: None,
            },
            ClusterRole {
                metadata: ObjectMeta::cluster(BASIC_USER_ROLE_NAME),
                rules: vec![
                    PolicyRuleBuilder::new(["get"])
                        .groups([USER_GROUP_NAME])
                        .resources(["users"])
                        .names([RESERVED_CURRENT_USER])
                        .build()?,
                    PolicyRuleBuilder::new(["list"])
                        .groups([PROJECT_GROUP_NAME])
                        .resources(["projectrequests"])
                        .build()?,
                    PolicyRuleBuilder::new(["list", "watch"])
                        .groups([PROJECT_GROUP_NAME])
                        .resources(["projects"])
                        .build()?,
                    PolicyRuleBuilder::new(READ)
                        .groups([RBAC_GROUP_NAME])
                        .resources(["clusterroles"])
                        .build()?,
                    PolicyRuleBuilder::new(["create"])
                        .groups([AUTHORIZATION_GROUP_NAME])
                        .resources(["selfsubjectrulesreviews"])
                        .build()?,
                ],
                aggregation_rule: None,
            },
            ClusterRole {
                metadata: system_only(DISCOVERY_ROLE_NAME),
                rules: vec![self.discovery_rule()?],
                aggregation_rule: None,
            },
            ClusterRole {
                metadata: system_only(METRICS_READER_ROLE_NAME),
                rules: vec![
                    PolicyRuleBuilder::new(["get"])
                        .urls(self.metrics_urls.iter().copied())
                        .build()?,
                ],
                aggregation_rule: None,
            },
        ];

        debug!("Loaded {} bootstrap cluster role(s)", roles.len());
        Ok(roles)
    }

    pub fn cluster_role_bindings(&self) -> Vec<ClusterRoleBinding> {
        let scheme = SystemServiceAccounts;
        let binding = |name: &str, role: &str, users: &[&str], groups: &[&str]| {
            ClusterRoleBinding {
                metadata: ObjectMeta::cluster(name),
                subjects: build_subjects(&scheme, users, groups),
                role_ref: RoleRef::cluster(role),
            }
        };

        vec![
            binding(
                CLUSTER_ADMIN_BINDING_NAME,
                CLUSTER_ADMIN_ROLE_NAME,
                &[SYSTEM_ADMIN_USERNAME],
                &[MASTERS_GROUP],
            ),
            binding(
                BASIC_USER_BINDING_NAME,
                BASIC_USER_ROLE_NAME,
                &[],
                &[AUTHENTICATED_GROUP],
            ),
            binding(
                DISCOVERY_BINDING_NAME,
                DISCOVERY_ROLE_NAME,
                &[],
                &[AUTHENTICATED_GROUP, UNAUTHENTICATED_GROUP],
            ),
        ]
    }

    /// The full bootstrap policy as one document.
    pub fn policy(&self) -> Result<AuthorizationPolicy> {
        Ok(AuthorizationPolicy {
            cluster_roles: self.cluster_roles()?,
            cluster_role_bindings: self.cluster_role_bindings(),
            ..Default::default()
        })
    }
}
