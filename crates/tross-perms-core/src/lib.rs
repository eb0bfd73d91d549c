//! # Tross Permissions Core
//!
//! Pure data for the TrossApp permission engine: roles, operations, and the
//! validated permission matrix.
//!
//! This crate holds no global state and performs no I/O. Parsing and
//! validation happen once, producing an immutable [`PermissionConfig`] that
//! every later lookup runs against.
//!
//! ## Key Types
//!
//! - [`Operation`] - The closed set of CRUD verbs
//! - [`Priority`] - A role's position in the privilege order
//! - [`Role`] - A named actor category with a unique priority
//! - [`PermissionDocument`] - The raw JSON document
//! - [`PermissionConfig`] - The validated, immutable configuration
//!
//! ## Validation
//!
//! Broken permission tables fail at load time with a [`ConfigError`]. See
//! [`validation`] for the full list of checks.

pub mod config;
pub mod document;
pub mod error;
pub mod types;
pub mod validation;

pub use config::{PermissionConfig, PermissionRule, ResourceRules, EMBEDDED_PERMISSIONS};
pub use document::{PermissionDocument, RoleEntry, RuleEntry};
pub use error::{ConfigError, Result};
pub use types::{normalize_role, Operation, Priority, Role};
pub use validation::validate_document;
