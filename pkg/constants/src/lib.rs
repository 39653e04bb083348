//! Centralized constants for the k3rs authorization packages.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod auth;
pub mod paths;
