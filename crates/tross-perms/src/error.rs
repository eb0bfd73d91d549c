//! Error types for the permission engine.

use thiserror::Error;
use tross_perms_core::ConfigError;

/// An authorization check that did not pass.
///
/// Produced only by [`crate::PermissionService::require`]. The engine itself
/// answers with plain booleans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied: role {} cannot {operation} {resource}", .role.as_deref().unwrap_or("<none>"))]
pub struct AccessDenied {
    /// The caller's role as supplied, if any.
    pub role: Option<String>,

    /// The requested resource.
    pub resource: String,

    /// The requested operation as supplied.
    pub operation: String,

    /// The least privileged role that would have been allowed, if the
    /// (resource, operation) pair is defined.
    pub minimum_role: Option<String>,
}

/// Errors that can occur in the permission engine.
#[derive(Debug, Error)]
pub enum PermsError {
    /// The permission configuration failed to load.
    #[error("permission config error: {0}")]
    Config(#[from] ConfigError),

    /// An authorization check failed.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),
}

/// Result type for permission engine operations.
pub type Result<T> = std::result::Result<T, PermsError>;
