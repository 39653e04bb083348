use crate::error::{PolicyError, Result};
use pkg_types::authorization::PolicyRule;

/// Builder for a single validated [`PolicyRule`].
///
/// ```
/// use pkg_policy::PolicyRuleBuilder;
///
/// let rule = PolicyRuleBuilder::new(["get", "list"])
///     .groups([""])
///     .resources(["pods"])
///     .build()
///     .unwrap();
/// assert!(rule.is_resource_rule());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyRuleBuilder {
    rule: PolicyRule,
}

impl PolicyRuleBuilder {
    pub fn new<I, S>(verbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule: PolicyRule {
                verbs: verbs.into_iter().map(Into::into).collect(),
                ..Default::default()
            },
        }
    }

    /// Seed a builder from an existing rule, e.g. one decoded from a file,
    /// so that `build` re-validates it.
    pub fn from_rule(rule: PolicyRule) -> Self {
        Self { rule }
    }

    pub fn groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule.api_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule.resources.extend(resources.into_iter().map(Into::into));
        self
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule.resource_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule.non_resource_urls.extend(urls.into_iter().map(Into::into));
        self
    }

    /// Validate and return the rule. A successful build is either a resource
    /// rule or a non-resource rule, never both.
    pub fn build(self) -> Result<PolicyRule> {
        let rule = self.rule;

        if rule.verbs.is_empty() {
            return Err(PolicyError::MissingVerbs);
        }
        if rule.attribute_restrictions.is_some() {
            return Err(PolicyError::DeprecatedAttributeRestrictions);
        }

        if rule.is_non_resource_rule() {
            if rule.is_resource_rule() {
                return Err(PolicyError::MixedRuleKinds);
            }
        } else if !rule.resources.is_empty() {
            if rule.api_groups.is_empty() {
                return Err(PolicyError::MissingApiGroups);
            }
        } else {
            return Err(PolicyError::EmptyRule);
        }

        Ok(rule)
    }
}

/// Re-validate a rule that did not come from a builder.
pub fn validate_rule(rule: &PolicyRule) -> Result<()> {
    PolicyRuleBuilder::from_rule(rule.clone()).build().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::authorization::{AttributeRestrictions, string_set};

    #[test]
    fn builds_resource_rule() {
        let rule = PolicyRuleBuilder::new(["get"])
            .groups([""])
            .resources(["pods"])
            .build()
            .unwrap();
        assert_eq!(rule.verbs, string_set(["get"]));
        assert_eq!(rule.api_groups, vec![String::new()]);
        assert_eq!(rule.resources, string_set(["pods"]));
        assert!(rule.non_resource_urls.is_empty());
    }

    #[test]
    fn builds_non_resource_rule() {
        let rule = PolicyRuleBuilder::new(["get"])
            .urls(["/healthz", "/version/*"])
            .build()
            .unwrap();
        assert!(rule.is_non_resource_rule());
        assert!(!rule.is_resource_rule());
    }

    #[test]
    fn rejects_missing_verbs() {
        let err = PolicyRuleBuilder::new(Vec::<String>::new())
            .groups([""])
            .resources(["pods"])
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::MissingVerbs);
    }

    #[test]
    fn rejects_mixed_rule_kinds() {
        let err = PolicyRuleBuilder::new(["get"])
            .resources(["pods"])
            .urls(["/healthz"])
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::MixedRuleKinds);

        let err = PolicyRuleBuilder::new(["get"])
            .groups(["apps"])
            .urls(["/healthz"])
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::MixedRuleKinds);
    }

    #[test]
    fn rejects_resources_without_groups() {
        let err = PolicyRuleBuilder::new(["get"])
            .resources(["pods"])
            .build()
            .unwrap_err();
        assert_eq!(err, PolicyError::MissingApiGroups);
    }

    #[test]
    fn rejects_empty_rule() {
        assert_eq!(
            PolicyRuleBuilder::new(["get"]).build().unwrap_err(),
            PolicyError::EmptyRule
        );
        // Names alone do not make a resource rule.
        assert_eq!(
            PolicyRuleBuilder::new(["get"])
                .groups([""])
                .names(["foo"])
                .build()
                .unwrap_err(),
            PolicyError::EmptyRule
        );
    }

    #[test]
    fn rejects_attribute_restrictions_from_decoded_rule() {
        let rule = PolicyRule {
            verbs: string_set(["create"]),
            attribute_restrictions: Some(AttributeRestrictions(
                serde_json::json!({ "kind": "IsPersonalSubjectAccessReview" }),
            )),
            api_groups: vec![String::new()],
            resources: string_set(["subjectaccessreviews"]),
            ..Default::default()
        };
        assert_eq!(
            validate_rule(&rule).unwrap_err(),
            PolicyError::DeprecatedAttributeRestrictions
        );
    }

    #[test]
    fn validate_accepts_builder_output() {
        let rule = PolicyRuleBuilder::new(["*"])
            .groups(["*"])
            .resources(["*"])
            .build()
            .unwrap();
        assert!(validate_rule(&rule).is_ok());
    }

    mod proptest_builder {
        use proptest::collection::vec;
        use proptest::prelude::*;

        use super::*;

        fn words() -> impl Strategy<Value = Vec<String>> {
            vec("[a-z*]{1,6}", 0..3)
        }

        proptest! {
            #[test]
            fn prop_built_rules_are_never_mixed(
                verbs in words(),
                groups in words(),
                resources in words(),
                names in words(),
                urls in words(),
            ) {
                let built = PolicyRuleBuilder::new(verbs)
                    .groups(groups)
                    .resources(resources)
                    .names(names)
                    .urls(urls)
                    .build();
                if let Ok(rule) = built {
                    prop_assert!(!rule.verbs.is_empty());
                    prop_assert!(rule.is_resource_rule() != rule.is_non_resource_rule());
                }
            }
        }
    }
}
