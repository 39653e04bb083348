use thiserror::Error;

/// Validation failures raised while building or converting policy objects.
///
/// All of these are caller-fixable input errors; none is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("verbs are required")]
    MissingVerbs,

    #[error("attribute restrictions are deprecated and cannot be built")]
    DeprecatedAttributeRestrictions,

    #[error("non-resource rule may not have apiGroups, resources, or resourceNames")]
    MixedRuleKinds,

    #[error("resource rule must have apiGroups")]
    MissingApiGroups,

    #[error("a rule must have either nonResourceURLs or resources")]
    EmptyRule,

    #[error("invalid kind {kind:?} for role ref {name:?}")]
    UnknownRoleRefKind { kind: String, name: String },

    #[error(
        "role binding {binding} attempts to reference role in namespace {role_namespace:?} \
         instead of current namespace {binding_namespace:?}"
    )]
    CrossNamespaceRoleRef {
        binding: String,
        role_namespace: String,
        binding_namespace: String,
    },

    #[error(
        "cluster role binding {binding} attempts to reference role in namespace \
         {role_namespace:?} instead of cluster scope"
    )]
    ClusterBindingMustBeClusterScoped {
        binding: String,
        role_namespace: String,
    },

    #[error("invalid kind {kind:?} for subject {name:?}")]
    UnknownSubjectKind { kind: String, name: String },

    #[error("invalid service account username {username:?}: {reason}")]
    InvalidServiceAccountUsername { username: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            PolicyError::MissingVerbs,
            PolicyError::DeprecatedAttributeRestrictions,
            PolicyError::MixedRuleKinds,
            PolicyError::MissingApiGroups,
            PolicyError::EmptyRule,
            PolicyError::UnknownRoleRefKind {
                kind: "Policy".to_string(),
                name: "view".to_string(),
            },
            PolicyError::CrossNamespaceRoleRef {
                binding: "edit".to_string(),
                role_namespace: "prod".to_string(),
                binding_namespace: "dev".to_string(),
            },
            PolicyError::ClusterBindingMustBeClusterScoped {
                binding: "admins".to_string(),
                role_namespace: "dev".to_string(),
            },
            PolicyError::UnknownSubjectKind {
                kind: "Robot".to_string(),
                name: "r2d2".to_string(),
            },
            PolicyError::InvalidServiceAccountUsername {
                username: "alice".to_string(),
                reason: "missing prefix".to_string(),
            },
        ];

        for error in errors {
            let rendered = error.to_string();
            assert!(!rendered.is_empty());
        }
    }

    #[test]
    fn cross_namespace_message_names_both_namespaces() {
        let err = PolicyError::CrossNamespaceRoleRef {
            binding: "edit".to_string(),
            role_namespace: "prod".to_string(),
            binding_namespace: "dev".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("\"prod\""));
        assert!(rendered.contains("\"dev\""));
    }
}
