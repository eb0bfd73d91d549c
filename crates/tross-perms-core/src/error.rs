//! Error types for permission configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Operation, Priority};

/// Errors raised while loading or validating a permission configuration.
///
/// Every variant is fatal: a process must not serve requests with a
/// permission table that failed to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read permission config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse permission config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("permission config defines no roles")]
    NoRoles,

    #[error("permission config defines no resources")]
    NoResources,

    #[error("invalid role name {0:?}")]
    InvalidRoleName(String),

    #[error("role {0:?} is defined more than once")]
    DuplicateRole(String),

    #[error("invalid resource name {0:?}")]
    InvalidResourceName(String),

    #[error("role {role:?} has invalid priority {priority}; priorities must be positive")]
    InvalidPriority { role: String, priority: u32 },

    #[error("roles {first:?} and {second:?} share priority {priority}")]
    DuplicatePriority {
        priority: Priority,
        first: String,
        second: String,
    },

    #[error("resource {resource:?} defines unknown operation {operation:?}")]
    UnknownOperation { resource: String, operation: String },

    #[error("resource {resource:?} is missing operation {operation}")]
    MissingOperation {
        resource: String,
        operation: Operation,
    },

    #[error("{resource}.{operation} requires priority {priority}, which no role has")]
    DanglingPriority {
        resource: String,
        operation: Operation,
        priority: Priority,
    },

    #[error("{resource}.{operation} names minimum role {role:?} but requires priority {priority}")]
    MinimumRoleMismatch {
        resource: String,
        operation: Operation,
        role: String,
        priority: Priority,
    },

    #[error("row-level security references unknown role {0:?}")]
    RlsUnknownRole(String),

    #[error("row-level security for role {role:?} references unknown resource {resource:?}")]
    RlsUnknownResource { role: String, resource: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
