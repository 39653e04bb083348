//! Authorization / RBAC constants.

// ─── API groups and wildcards ─────────────────────────────────────────────

/// API group of the cluster-native RBAC resources.
/// Also stamped on User and Group subjects to mark them as global identities.
pub const RBAC_GROUP_NAME: &str = "rbac.authorization.k8s.io";

/// The core ("legacy") API group.
pub const CORE_GROUP_NAME: &str = "";

/// Group of the user and group resources.
pub const USER_GROUP_NAME: &str = "user.openshift.io";

/// Group of the authorization review resources.
pub const AUTHORIZATION_GROUP_NAME: &str = "authorization.openshift.io";

/// Group of the project resources.
pub const PROJECT_GROUP_NAME: &str = "project.openshift.io";

pub const API_GROUP_ALL: &str = "*";
pub const RESOURCE_ALL: &str = "*";
pub const VERB_ALL: &str = "*";
pub const NON_RESOURCE_ALL: &str = "*";

// ─── Kinds ────────────────────────────────────────────────────────────────

pub const USER_KIND: &str = "User";
pub const GROUP_KIND: &str = "Group";
pub const SERVICE_ACCOUNT_KIND: &str = "ServiceAccount";
pub const SYSTEM_USER_KIND: &str = "SystemUser";
pub const SYSTEM_GROUP_KIND: &str = "SystemGroup";

pub const ROLE_KIND: &str = "Role";
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

// ─── Principal names ──────────────────────────────────────────────────────

/// Username prefix of service-account identities.
/// Full username = `SERVICE_ACCOUNT_USERNAME_PREFIX + namespace + ":" + name`.
pub const SERVICE_ACCOUNT_USERNAME_PREFIX: &str = "system:serviceaccount:";

/// Separator between namespace and name in a service-account username.
pub const SERVICE_ACCOUNT_USERNAME_SEPARATOR: char = ':';

/// Separator reserved for system identities (e.g. `system:admin`).
pub const SYSTEM_IDENTITY_SEPARATOR: char = ':';

/// Username that is never a valid ordinary user (it denotes "the current user").
pub const RESERVED_CURRENT_USER: &str = "~";

pub const SYSTEM_ADMIN_USERNAME: &str = "system:admin";
pub const MASTERS_GROUP: &str = "system:masters";
pub const AUTHENTICATED_GROUP: &str = "system:authenticated";
pub const UNAUTHENTICATED_GROUP: &str = "system:unauthenticated";

// ─── Bootstrap role names ─────────────────────────────────────────────────

pub const CLUSTER_ADMIN_ROLE_NAME: &str = "cluster-admin";
pub const BASIC_USER_ROLE_NAME: &str = "basic-user";
pub const DISCOVERY_ROLE_NAME: &str = "system:discovery";
pub const METRICS_READER_ROLE_NAME: &str = "system:metrics-reader";

pub const CLUSTER_ADMIN_BINDING_NAME: &str = "cluster-admins";
pub const BASIC_USER_BINDING_NAME: &str = "basic-users";
pub const DISCOVERY_BINDING_NAME: &str = "system:discovery";

/// Annotation key marking a role as system-only (hidden from the UI).
pub const ROLE_SYSTEM_ONLY_ANNOTATION: &str = "authorization.openshift.io/system-only";
