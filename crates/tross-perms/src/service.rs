//! Intention-revealing wrappers for authorization middleware and UI logic.
//!
//! Callers usually hold a role taken from an authenticated context that may
//! be missing, so every method accepts `Option<&str>`. `None` and `""` are
//! treated the same: denied.

use std::collections::BTreeMap;

use tross_perms_core::{Operation, Priority};

use crate::engine::PermissionEngine;
use crate::error::{AccessDenied, Result};

/// Role name of the manager tier.
pub const MANAGER: &str = "manager";
/// Role name of the dispatcher tier.
pub const DISPATCHER: &str = "dispatcher";
/// Role name of the technician tier.
pub const TECHNICIAN: &str = "technician";

/// Facade over [`PermissionEngine`] for common checks.
#[derive(Debug, Clone)]
pub struct PermissionService {
    engine: PermissionEngine,
}

impl PermissionService {
    /// Create a service over an engine.
    pub fn new(engine: PermissionEngine) -> Self {
        Self { engine }
    }

    /// Create a service over the process-wide cached configuration.
    pub fn global() -> Result<Self> {
        Ok(Self::new(PermissionEngine::global()?))
    }

    /// Get the underlying engine.
    pub fn engine(&self) -> &PermissionEngine {
        &self.engine
    }

    /// Check whether `role` may perform `operation` on `resource`.
    pub fn can_perform(&self, role: Option<&str>, resource: &str, operation: &str) -> bool {
        role.is_some_and(|role| self.engine.has_permission_named(role, resource, operation))
    }

    /// Check whether `role` is at least as privileged as `required`.
    pub fn meets_minimum_role(&self, role: Option<&str>, required: &str) -> bool {
        role.is_some_and(|role| self.engine.has_minimum_role(role, required))
    }

    /// Check whether `role` is exactly the most privileged role.
    ///
    /// Not a minimum-role check: nothing ranks above the top role, so only
    /// that role itself qualifies.
    pub fn is_admin(&self, role: Option<&str>) -> bool {
        let Some(role) = role.and_then(|r| self.engine.role(r)) else {
            return false;
        };
        self.engine
            .highest_role()
            .is_some_and(|top| top.priority == role.priority)
    }

    /// Check whether `role` is a manager or anything above it.
    pub fn is_manager(&self, role: Option<&str>) -> bool {
        self.meets_minimum_role(role, MANAGER)
    }

    /// Check whether `role` is a dispatcher or anything above it.
    pub fn is_dispatcher(&self, role: Option<&str>) -> bool {
        self.meets_minimum_role(role, DISPATCHER)
    }

    /// Check whether `role` is a technician or anything above it.
    pub fn is_technician(&self, role: Option<&str>) -> bool {
        self.meets_minimum_role(role, TECHNICIAN)
    }

    /// Everything `role` may do, by resource.
    pub fn permissions_for(&self, role: Option<&str>) -> BTreeMap<String, Vec<Operation>> {
        role.map(|role| self.engine.role_permissions(role))
            .unwrap_or_default()
    }

    /// The priority of `role`.
    pub fn priority(&self, role: Option<&str>) -> Option<Priority> {
        role.and_then(|role| self.engine.role_priority(role))
    }

    /// The row-level security policy for `role` on `resource`.
    pub fn row_level_security(&self, role: Option<&str>, resource: &str) -> Option<&str> {
        role.and_then(|role| self.engine.row_level_security(role, resource))
    }

    /// Like [`can_perform`](Self::can_perform), returning an error on denial.
    ///
    /// Meant for middleware that maps [`AccessDenied`] to a rejection.
    pub fn require(&self, role: Option<&str>, resource: &str, operation: &str) -> Result<()> {
        if self.can_perform(role, resource, operation) {
            return Ok(());
        }

        let minimum_role = Operation::parse(operation)
            .and_then(|op| self.engine.minimum_role(resource, op))
            .map(String::from);

        tracing::debug!(
            role = role.unwrap_or("<none>"),
            resource,
            operation,
            minimum_role = minimum_role.as_deref().unwrap_or("<undefined>"),
            "permission denied"
        );

        Err(AccessDenied {
            role: role.map(String::from),
            resource: resource.to_string(),
            operation: operation.to_string(),
            minimum_role,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tross_perms_core::PermissionConfig;

    use crate::error::PermsError;

    fn service() -> PermissionService {
        let config = PermissionConfig::embedded().unwrap();
        PermissionService::new(PermissionEngine::new(Arc::new(config)))
    }

    #[test]
    fn test_can_perform() {
        let service = service();
        assert!(service.can_perform(Some("manager"), "work_orders", "delete"));
        assert!(!service.can_perform(Some("dispatcher"), "work_orders", "delete"));
        assert!(!service.can_perform(None, "work_orders", "read"));
        assert!(!service.can_perform(Some(""), "work_orders", "read"));
        assert!(!service.can_perform(Some("admin"), "work_orders", "Read"));
    }

    #[test]
    fn test_is_admin_is_exact() {
        let service = service();
        assert!(service.is_admin(Some("admin")));
        assert!(service.is_admin(Some("ADMIN")));
        assert!(!service.is_admin(Some("manager")));
        assert!(!service.is_admin(Some("superadmin")));
        assert!(!service.is_admin(None));
    }

    #[test]
    fn test_tier_checks_are_minimums() {
        let service = service();

        assert!(service.is_manager(Some("admin")));
        assert!(service.is_manager(Some("manager")));
        assert!(!service.is_manager(Some("dispatcher")));

        assert!(service.is_dispatcher(Some("manager")));
        assert!(service.is_dispatcher(Some("Dispatcher")));
        assert!(!service.is_dispatcher(Some("technician")));

        assert!(service.is_technician(Some("dispatcher")));
        assert!(service.is_technician(Some("technician")));
        assert!(!service.is_technician(Some("customer")));
        assert!(!service.is_technician(None));
    }

    #[test]
    fn test_meets_minimum_role() {
        let service = service();
        assert!(service.meets_minimum_role(Some("customer"), "customer"));
        assert!(!service.meets_minimum_role(Some("customer"), "technician"));
        assert!(!service.meets_minimum_role(None, "customer"));
        assert!(!service.meets_minimum_role(Some("admin"), "root"));
    }

    #[test]
    fn test_priority_and_permissions_for() {
        let service = service();
        assert_eq!(service.priority(Some("Technician")), Some(Priority(2)));
        assert_eq!(service.priority(None), None);

        assert!(service.permissions_for(None).is_empty());
        let customer = service.permissions_for(Some("customer"));
        assert!(customer.contains_key("work_orders"));
        assert!(!customer.contains_key("audit_logs"));
    }

    #[test]
    fn test_row_level_security() {
        let service = service();
        assert_eq!(
            service.row_level_security(Some("customer"), "work_orders"),
            Some("own_work_orders_only")
        );
        assert_eq!(service.row_level_security(Some("customer"), "technicians"), None);
        assert_eq!(service.row_level_security(None, "work_orders"), None);
    }

    #[test]
    fn test_require() {
        let service = service();
        assert!(service.require(Some("admin"), "audit_logs", "read").is_ok());

        match service.require(Some("dispatcher"), "work_orders", "delete") {
            Err(PermsError::AccessDenied(denied)) => {
                assert_eq!(denied.role.as_deref(), Some("dispatcher"));
                assert_eq!(denied.resource, "work_orders");
                assert_eq!(denied.minimum_role.as_deref(), Some("manager"));
                assert_eq!(
                    denied.to_string(),
                    "access denied: role dispatcher cannot delete work_orders"
                );
            }
            other => panic!("expected AccessDenied, got {:?}", other),
        }

        match service.require(None, "ledgers", "read") {
            Err(PermsError::AccessDenied(denied)) => {
                assert_eq!(denied.role, None);
                assert_eq!(denied.minimum_role, None);
            }
            other => panic!("expected AccessDenied, got {:?}", other),
        }
    }
}
