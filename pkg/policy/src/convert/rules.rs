use pkg_types::authorization::{PolicyRule, StringSet};
use pkg_types::rbac;
use tracing::debug;

fn sorted(set: &StringSet) -> Vec<String> {
    let mut list: Vec<String> = set.iter().cloned().collect();
    list.sort();
    list
}

/// Convert one internal rule into zero, one or two RBAC rules.
///
/// - A rule carrying attribute restrictions is dropped: no authorizer ever
///   honors them, so the rule never grants anything.
/// - A rule with both resource and non-resource fields is split in two, both
///   sharing the verbs. A single RBAC rule cannot express that combination.
pub fn rule_to_rbac(rule: &PolicyRule) -> Vec<rbac::PolicyRule> {
    if let Some(restrictions) = &rule.attribute_restrictions {
        debug!(
            "Dropping policy rule with attribute restrictions (kind={:?}, verbs={:?})",
            restrictions.kind(),
            sorted(&rule.verbs)
        );
        return Vec::new();
    }

    let verbs = sorted(&rule.verbs);

    if rule.is_resource_rule() && rule.is_non_resource_rule() {
        debug!(
            "Splitting combined policy rule into resource and non-resource rules (verbs={:?})",
            verbs
        );
        return vec![
            rbac::PolicyRule {
                verbs: verbs.clone(),
                api_groups: rule.api_groups.clone(),
                resources: sorted(&rule.resources),
                resource_names: sorted(&rule.resource_names),
                non_resource_urls: Vec::new(),
            },
            rbac::PolicyRule {
                verbs,
                non_resource_urls: sorted(&rule.non_resource_urls),
                ..Default::default()
            },
        ];
    }

    vec![rbac::PolicyRule {
        verbs,
        api_groups: rule.api_groups.clone(),
        resources: sorted(&rule.resources),
        resource_names: sorted(&rule.resource_names),
        non_resource_urls: sorted(&rule.non_resource_urls),
    }]
}

pub fn rules_to_rbac(rules: &[PolicyRule]) -> Vec<rbac::PolicyRule> {
    rules.iter().flat_map(rule_to_rbac).collect()
}

/// Convert an RBAC rule to the internal model. Never fails.
pub fn rule_from_rbac(rule: &rbac::PolicyRule) -> PolicyRule {
    PolicyRule {
        verbs: rule.verbs.iter().cloned().collect(),
        attribute_restrictions: None,
        api_groups: rule.api_groups.clone(),
        resources: rule.resources.iter().cloned().collect(),
        resource_names: rule.resource_names.iter().cloned().collect(),
        non_resource_urls: rule.non_resource_urls.iter().cloned().collect(),
    }
}

/// Convert RBAC rules to the internal model.
///
/// Rules that were split on the way out are not merged back together.
pub fn rules_from_rbac(rules: &[rbac::PolicyRule]) -> Vec<PolicyRule> {
    rules.iter().map(rule_from_rbac).collect()
}
