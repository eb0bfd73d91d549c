//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use tross_perms::{PermissionConfig, PermissionDocument, PermissionEngine, PermissionService};

/// Roles of the reference fixture, most privileged first.
pub const REFERENCE_ROLES: [(&str, u32); 5] = [
    ("admin", 5),
    ("manager", 4),
    ("dispatcher", 3),
    ("technician", 2),
    ("client", 1),
];

/// The reference permission document shared by every runtime's test suite.
///
/// Rules are in create/read/update/delete order.
pub fn reference_document() -> PermissionDocument {
    let mut doc = PermissionDocument::default();
    for (name, priority) in REFERENCE_ROLES {
        doc = doc.with_role(name, priority);
    }

    doc.with_resource("users", [5, 4, 5, 5])
        .with_resource("roles", [5, 1, 5, 5])
        .with_resource("work_orders", [1, 1, 2, 4])
        .with_resource("audit_logs", [5, 5, 5, 5])
        .with_rls("client", "work_orders", Some("own_work_orders_only"))
        .with_rls("client", "users", Some("own_record_only"))
        .with_rls("technician", "work_orders", Some("assigned_work_orders_only"))
        .with_rls("dispatcher", "work_orders", None)
}

/// A test fixture holding an engine and service over one configuration.
pub struct TestFixture {
    pub config: Arc<PermissionConfig>,
    pub engine: PermissionEngine,
    pub service: PermissionService,
}

impl TestFixture {
    /// Build a fixture over the reference document.
    pub fn new() -> Self {
        Self::from_document(&reference_document())
    }

    /// Build a fixture over the canonical embedded document.
    pub fn embedded() -> Self {
        Self::from_config(PermissionConfig::embedded().expect("embedded permissions are valid"))
    }

    /// Build a fixture over an arbitrary valid document.
    pub fn from_document(doc: &PermissionDocument) -> Self {
        Self::from_config(PermissionConfig::from_document(doc).expect("fixture document is valid"))
    }

    fn from_config(config: PermissionConfig) -> Self {
        let config = Arc::new(config);
        let engine = PermissionEngine::new(Arc::clone(&config));
        let service = PermissionService::new(engine.clone());
        Self {
            config,
            engine,
            service,
        }
    }

    /// Role names, most privileged first.
    pub fn role_names(&self) -> Vec<String> {
        self.config.roles().iter().map(|r| r.name.clone()).collect()
    }

    /// Resource names in sorted order.
    pub fn resource_names(&self) -> Vec<String> {
        self.config.resources().map(String::from).collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
