use crate::error::{PolicyError, Result};
use crate::subject::{classify_group, classify_user};
use pkg_constants::auth::{
    CORE_GROUP_NAME, GROUP_KIND, RBAC_GROUP_NAME, SERVICE_ACCOUNT_KIND, USER_KIND,
};
use pkg_types::authorization::{Subject, SubjectKind};
use pkg_types::rbac;

/// Convert a subject to RBAC. System users and groups collapse into plain
/// users and groups in the RBAC API group.
pub fn subject_to_rbac(subject: &Subject) -> rbac::Subject {
    let (kind, api_group, namespace) = match subject.kind {
        SubjectKind::ServiceAccount => (
            SERVICE_ACCOUNT_KIND,
            CORE_GROUP_NAME,
            subject.namespace.clone().unwrap_or_default(),
        ),
        SubjectKind::User | SubjectKind::SystemUser => (USER_KIND, RBAC_GROUP_NAME, String::new()),
        SubjectKind::Group | SubjectKind::SystemGroup => {
            (GROUP_KIND, RBAC_GROUP_NAME, String::new())
        }
    };
    rbac::Subject {
        kind: kind.to_string(),
        api_group: api_group.to_string(),
        name: subject.name.clone(),
        namespace,
    }
}

pub fn subjects_to_rbac(subjects: &[Subject]) -> Vec<rbac::Subject> {
    subjects.iter().map(subject_to_rbac).collect()
}

/// Convert an RBAC subject back.
///
/// The incoming kind tag is not trusted for users and groups: whether the
/// name is a system identity is decided by re-classifying it.
pub fn subject_from_rbac(subject: &rbac::Subject) -> Result<Subject> {
    let unknown = || PolicyError::UnknownSubjectKind {
        kind: if subject.api_group.is_empty() {
            subject.kind.clone()
        } else {
            format!("{}/{}", subject.api_group, subject.kind)
        },
        name: subject.name.clone(),
    };

    match (subject.kind.as_str(), subject.api_group.as_str()) {
        (SERVICE_ACCOUNT_KIND, CORE_GROUP_NAME) => Ok(Subject {
            kind: SubjectKind::ServiceAccount,
            name: subject.name.clone(),
            namespace: Some(subject.namespace.clone()).filter(|ns| !ns.is_empty()),
        }),
        (USER_KIND, "" | RBAC_GROUP_NAME) => {
            Ok(Subject::new(classify_user(&subject.name), &subject.name))
        }
        (GROUP_KIND, "" | RBAC_GROUP_NAME) => {
            Ok(Subject::new(classify_group(&subject.name), &subject.name))
        }
        _ => Err(unknown()),
    }
}

pub fn subjects_from_rbac(subjects: &[rbac::Subject]) -> Result<Vec<Subject>> {
    subjects.iter().map(subject_from_rbac).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rbac_subject(kind: &str, api_group: &str, name: &str, namespace: &str) -> rbac::Subject {
        rbac::Subject {
            kind: kind.to_string(),
            api_group: api_group.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }

    #[test]
    fn system_kinds_collapse_with_global_marker() {
        let converted = subjects_to_rbac(&[
            Subject::new(SubjectKind::User, "alice"),
            Subject::new(SubjectKind::SystemUser, "system:admin"),
            Subject::new(SubjectKind::Group, "devs"),
            Subject::new(SubjectKind::SystemGroup, "system:masters"),
            Subject::service_account("ci", "builder"),
        ]);
        assert_eq!(
            converted,
            vec![
                make_rbac_subject("User", RBAC_GROUP_NAME, "alice", ""),
                make_rbac_subject("User", RBAC_GROUP_NAME, "system:admin", ""),
                make_rbac_subject("Group", RBAC_GROUP_NAME, "devs", ""),
                make_rbac_subject("Group", RBAC_GROUP_NAME, "system:masters", ""),
                make_rbac_subject("ServiceAccount", "", "builder", "ci"),
            ]
        );
    }

    #[test]
    fn from_rbac_reclassifies_names() {
        let subjects = subjects_from_rbac(&[
            make_rbac_subject("User", RBAC_GROUP_NAME, "alice", ""),
            make_rbac_subject("User", RBAC_GROUP_NAME, "system:admin", ""),
            make_rbac_subject("User", "", "~", ""),
            make_rbac_subject("Group", RBAC_GROUP_NAME, "system:authenticated", ""),
            make_rbac_subject("Group", RBAC_GROUP_NAME, "devs", ""),
        ])
        .unwrap();
        let kinds: Vec<SubjectKind> = subjects.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SubjectKind::User,
                SubjectKind::SystemUser,
                SubjectKind::SystemUser,
                SubjectKind::SystemGroup,
                SubjectKind::Group,
            ]
        );
    }

    #[test]
    fn service_account_keeps_namespace() {
        let subject =
            subject_from_rbac(&make_rbac_subject("ServiceAccount", "", "builder", "ci")).unwrap();
        assert_eq!(subject, Subject::service_account("ci", "builder"));

        let subject =
            subject_from_rbac(&make_rbac_subject("ServiceAccount", "", "builder", "")).unwrap();
        assert_eq!(subject.namespace, None);
    }

    #[test]
    fn rejects_unknown_kinds() {
        let err = subject_from_rbac(&make_rbac_subject("SystemUser", "", "system:admin", ""))
            .unwrap_err();
        assert_eq!(
            err,
            PolicyError::UnknownSubjectKind {
                kind: "SystemUser".to_string(),
                name: "system:admin".to_string(),
            }
        );

        let err = subjects_from_rbac(&[
            make_rbac_subject("User", RBAC_GROUP_NAME, "alice", ""),
            make_rbac_subject("User", "example.com", "bob", ""),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            PolicyError::UnknownSubjectKind {
                kind: "example.com/User".to_string(),
                name: "bob".to_string(),
            }
        );
    }
}
