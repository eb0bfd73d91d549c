//! # Tross Permissions
//!
//! The TrossApp role-based permission engine.
//!
//! ## Overview
//!
//! Access decisions are a pure function of a permission configuration that is
//! loaded once and never mutated:
//!
//! - **Roles** carry unique priorities that form a total privilege order
//! - **Rules** map each (resource, operation) pair to a minimum priority
//! - **Row-level security** maps (role, resource) to an opaque policy id
//!
//! A role may perform an operation when its priority is at least the rule's
//! minimum. Unknown or malformed input is always denied; nothing in the
//! evaluation path returns an error or panics.
//!
//! ## Key Types
//!
//! - [`PermissionEngine`] - Evaluation over a shared [`PermissionConfig`]
//! - [`PermissionService`] - Named checks (`is_manager`, `require`, ...)
//! - [`LoaderConfig`] - Where the permission document is read from
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tross_perms::{load_permissions, Operation, PermissionEngine, PermissionService};
//!
//! fn example() -> tross_perms::Result<()> {
//!     // Load once at startup; a broken table aborts here.
//!     let config = load_permissions()?;
//!     let engine = PermissionEngine::new(config);
//!
//!     assert!(engine.has_permission("manager", "work_orders", Operation::Delete));
//!     assert!(!engine.has_permission("dispatcher", "work_orders", Operation::Delete));
//!
//!     let service = PermissionService::new(engine);
//!     service.require(Some("technician"), "work_orders", "update")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `tross_perms::core` - Types, document format and validation

pub mod engine;
pub mod error;
pub mod loader;
pub mod service;

pub use tross_perms_core as core;

pub use engine::PermissionEngine;
pub use error::{AccessDenied, PermsError, Result};
pub use loader::{
    load_permissions, load_with, LoaderConfig, PermissionSource, PERMISSIONS_PATH_VAR,
};
pub use service::PermissionService;

pub use tross_perms_core::{
    ConfigError, Operation, PermissionConfig, PermissionDocument, PermissionRule, Priority, Role,
};
