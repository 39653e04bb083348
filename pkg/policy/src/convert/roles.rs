use crate::convert::rules::{rules_from_rbac, rules_to_rbac};
use pkg_types::authorization::{ClusterRole, Role};
use pkg_types::rbac;
use tracing::debug;

fn log_rule_count_change(kind: &str, name: &str, before: usize, after: usize) {
    if before != after {
        debug!(
            "{} {}: {} internal rule(s) became {} RBAC rule(s)",
            kind, name, before, after
        );
    }
}

pub fn role_to_rbac(role: &Role) -> rbac::Role {
    let rules = rules_to_rbac(&role.rules);
    log_rule_count_change("Role", &role.metadata.name, role.rules.len(), rules.len());
    rbac::Role {
        metadata: role.metadata.clone(),
        rules,
    }
}

pub fn role_from_rbac(role: &rbac::Role) -> Role {
    Role {
        metadata: role.metadata.clone(),
        rules: rules_from_rbac(&role.rules),
    }
}

/// Convert a cluster role to RBAC. The aggregation rule, if any, is carried
/// over unchanged.
pub fn cluster_role_to_rbac(role: &ClusterRole) -> rbac::ClusterRole {
    let rules = rules_to_rbac(&role.rules);
    log_rule_count_change(
        "ClusterRole",
        &role.metadata.name,
        role.rules.len(),
        rules.len(),
    );
    rbac::ClusterRole {
        metadata: role.metadata.clone(),
        rules,
        aggregation_rule: role.aggregation_rule.clone(),
    }
}

pub fn cluster_role_from_rbac(role: &rbac::ClusterRole) -> ClusterRole {
    ClusterRole {
        metadata: role.metadata.clone(),
        rules: rules_from_rbac(&role.rules),
        aggregation_rule: role.aggregation_rule.clone(),
    }
}
