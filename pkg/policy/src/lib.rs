//! Policy-rule authorization core.
//!
//! Builds validated policy rules, classifies principal names into ordinary and
//! system identities, and converts roles and bindings between the internal
//! authorization model and the cluster-native RBAC model.
//!
//! Everything here is a pure function over immutable inputs.

pub mod bootstrap;
pub mod convert;
pub mod error;
pub mod rule;
pub mod subject;

pub use error::{PolicyError, Result};
pub use rule::PolicyRuleBuilder;
pub use subject::{ServiceAccountUsernames, SystemServiceAccounts};
