//! Object models shared by the k3rs authorization packages.
//!
//! Two representations of the same policy live side by side:
//! [`authorization`] is the internal model (set-typed rules, system subject
//! kinds, namespaced role refs) and [`rbac`] is the cluster-native RBAC wire
//! model. Conversion between them lives in `pkg-policy`.

pub mod authorization;
pub mod config;
pub mod meta;
pub mod policy;
pub mod rbac;
pub mod validate;
