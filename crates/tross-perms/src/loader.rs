//! Loading and caching the permission configuration.
//!
//! [`load_permissions`] is the process-wide entry point: the first call
//! reads and validates the configured source, later calls return the same
//! cached [`Arc`]. [`load_with`] loads without touching the cache, for
//! callers that inject their own configuration.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tross_perms_core::{ConfigError, PermissionConfig};

use crate::error::Result;

/// Environment variable naming a permission document on disk.
pub const PERMISSIONS_PATH_VAR: &str = "TROSS_PERMISSIONS_PATH";

static GLOBAL: OnceLock<Arc<PermissionConfig>> = OnceLock::new();

/// Where the permission document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PermissionSource {
    /// The canonical document compiled into `tross-perms-core`.
    #[default]
    Embedded,

    /// A JSON file on disk.
    File(PathBuf),

    /// JSON text supplied directly.
    Inline(String),
}

impl fmt::Display for PermissionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionSource::Embedded => f.write_str("embedded"),
            PermissionSource::File(path) => write!(f, "file:{}", path.display()),
            PermissionSource::Inline(_) => f.write_str("inline"),
        }
    }
}

/// Configuration for the loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Source of the permission document.
    pub source: PermissionSource,
}

impl LoaderConfig {
    /// Create a loader config for a specific source.
    pub fn new(source: PermissionSource) -> Self {
        Self { source }
    }

    /// Build the loader config from the process environment.
    ///
    /// Uses the file named by `TROSS_PERMISSIONS_PATH` when it is set and
    /// non-empty, and the embedded document otherwise.
    pub fn from_env() -> Self {
        Self::from_path_var(std::env::var_os(PERMISSIONS_PATH_VAR))
    }

    fn from_path_var(value: Option<OsString>) -> Self {
        match value {
            Some(path) if !path.is_empty() => Self::new(PermissionSource::File(path.into())),
            _ => Self::default(),
        }
    }
}

/// Get the process-wide permission configuration.
///
/// The first successful call loads from [`LoaderConfig::from_env`] and
/// caches the result; every later call returns a clone of the same `Arc`.
/// Concurrent first callers may each parse the document, but only one
/// result is ever stored. Failures are not cached.
pub fn load_permissions() -> Result<Arc<PermissionConfig>> {
    if let Some(config) = GLOBAL.get() {
        return Ok(Arc::clone(config));
    }

    let config = load_with(&LoaderConfig::from_env())?;
    Ok(Arc::clone(GLOBAL.get_or_init(|| config)))
}

/// Load and validate a permission configuration without caching it.
pub fn load_with(loader: &LoaderConfig) -> Result<Arc<PermissionConfig>> {
    match read_source(&loader.source) {
        Ok(config) => {
            tracing::info!(
                source = %loader.source,
                roles = config.roles().len(),
                resources = config.resources().count(),
                fingerprint = %config.fingerprint(),
                "loaded permission config"
            );
            Ok(Arc::new(config))
        }
        Err(e) => {
            tracing::warn!(source = %loader.source, error = %e, "permission config rejected");
            Err(e.into())
        }
    }
}

fn read_source(source: &PermissionSource) -> std::result::Result<PermissionConfig, ConfigError> {
    match source {
        PermissionSource::Embedded => PermissionConfig::embedded(),
        PermissionSource::File(path) => {
            let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            PermissionConfig::from_slice(&bytes)
        }
        PermissionSource::Inline(json) => PermissionConfig::from_json_str(json),
    }
}
