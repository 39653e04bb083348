//! Filesystem path constants.

/// Default config file path for `rbacctl`.
pub const DEFAULT_RBACCTL_CONFIG: &str = "/etc/k3rs/rbacctl.yaml";
