//! Principal classification: ordinary vs. system identities, and
//! service-account usernames.

use crate::error::{PolicyError, Result};
use pkg_constants::auth::{SERVICE_ACCOUNT_USERNAME_PREFIX, SERVICE_ACCOUNT_USERNAME_SEPARATOR};
use pkg_types::authorization::{Subject, SubjectKind};
use pkg_types::validate::{
    validate_dns_label, validate_dns_subdomain, validate_group_name, validate_user_name,
};

/// Classify a bare user name.
///
/// Anything that is not a valid ordinary user name (unsafe path segment,
/// contains `:`, or is `~`) is a system user. Never fails.
pub fn classify_user(name: &str) -> SubjectKind {
    match validate_user_name(name) {
        Ok(()) => SubjectKind::User,
        Err(_) => SubjectKind::SystemUser,
    }
}

/// Classify a bare group name. Same rules as [`classify_user`].
pub fn classify_group(name: &str) -> SubjectKind {
    match validate_group_name(name) {
        Ok(()) => SubjectKind::Group,
        Err(_) => SubjectKind::SystemGroup,
    }
}

/// Encoding of service-account identities as usernames.
pub trait ServiceAccountUsernames {
    /// Split a username into `(namespace, name)`, failing if it is not a
    /// service-account username.
    fn split(&self, username: &str) -> Result<(String, String)>;

    /// Build the username of the service account `namespace/name`.
    fn make(&self, namespace: &str, name: &str) -> String;
}

/// The `system:serviceaccount:<namespace>:<name>` scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemServiceAccounts;

impl ServiceAccountUsernames for SystemServiceAccounts {
    fn split(&self, username: &str) -> Result<(String, String)> {
        let invalid = |reason: String| PolicyError::InvalidServiceAccountUsername {
            username: username.to_string(),
            reason,
        };

        let rest = username
            .strip_prefix(SERVICE_ACCOUNT_USERNAME_PREFIX)
            .ok_or_else(|| invalid(format!("missing prefix {:?}", SERVICE_ACCOUNT_USERNAME_PREFIX)))?;

        let parts: Vec<&str> = rest.split(SERVICE_ACCOUNT_USERNAME_SEPARATOR).collect();
        let [namespace, name] = parts.as_slice() else {
            return Err(invalid("expected <namespace>:<name> after prefix".to_string()));
        };

        validate_dns_label(namespace).map_err(|e| invalid(format!("namespace: {}", e)))?;
        validate_dns_subdomain(name).map_err(|e| invalid(format!("name: {}", e)))?;

        Ok((namespace.to_string(), name.to_string()))
    }

    fn make(&self, namespace: &str, name: &str) -> String {
        format!(
            "{}{}{}{}",
            SERVICE_ACCOUNT_USERNAME_PREFIX, namespace, SERVICE_ACCOUNT_USERNAME_SEPARATOR, name
        )
    }
}

/// Resolve a raw username to a subject: a service account if `scheme`
/// recognizes it, otherwise a (system) user.
pub fn resolve_service_account_or_user<S>(scheme: &S, raw: &str) -> Subject
where
    S: ServiceAccountUsernames + ?Sized,
{
    match scheme.split(raw) {
        Ok((namespace, name)) => Subject::service_account(namespace, name),
        Err(_) => Subject::new(classify_user(raw), raw),
    }
}

/// Build subjects from raw user and group names.
pub fn build_subjects<S, U, G>(scheme: &S, users: &[U], groups: &[G]) -> Vec<Subject>
where
    S: ServiceAccountUsernames + ?Sized,
    U: AsRef<str>,
    G: AsRef<str>,
{
    let users = users
        .iter()
        .map(|user| resolve_service_account_or_user(scheme, user.as_ref()));
    let groups = groups
        .iter()
        .map(|group| Subject::new(classify_group(group.as_ref()), group.as_ref()));
    users.chain(groups).collect()
}

/// Flatten subjects back into `(users, groups)` name lists.
///
/// Service accounts become usernames via `scheme`; one without a namespace
/// is taken to live in `current_namespace`.
pub fn subject_names<S>(
    scheme: &S,
    current_namespace: &str,
    subjects: &[Subject],
) -> (Vec<String>, Vec<String>)
where
    S: ServiceAccountUsernames + ?Sized,
{
    let mut users = Vec::new();
    let mut groups = Vec::new();

    for subject in subjects {
        match subject.kind {
            SubjectKind::User | SubjectKind::SystemUser => users.push(subject.name.clone()),
            SubjectKind::Group | SubjectKind::SystemGroup => groups.push(subject.name.clone()),
            SubjectKind::ServiceAccount => {
                let namespace = subject
                    .namespace
                    .as_deref()
                    .filter(|ns| !ns.is_empty())
                    .unwrap_or(current_namespace);
                users.push(scheme.make(namespace, &subject.name));
            }
        }
    }

    (users, groups)
}
