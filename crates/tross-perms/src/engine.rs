//! Permission evaluation over a loaded configuration.
//!
//! Every function here is total and fails closed: an unknown or empty role,
//! resource or operation yields `false`, `None` or an empty map. Nothing in
//! this module returns an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use tross_perms_core::{Operation, PermissionConfig, PermissionRule, Priority, Role};

use crate::error::Result;
use crate::loader::load_permissions;

/// Evaluates authorization questions against an immutable configuration.
///
/// Cloning is cheap; clones share the same configuration.
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    config: Arc<PermissionConfig>,
}

impl PermissionEngine {
    /// Create an engine over an injected configuration.
    pub fn new(config: Arc<PermissionConfig>) -> Self {
        Self { config }
    }

    /// Create an engine over the process-wide cached configuration.
    pub fn global() -> Result<Self> {
        Ok(Self::new(load_permissions()?))
    }

    /// Get the underlying configuration.
    pub fn config(&self) -> &Arc<PermissionConfig> {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Role Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the priority of a role. Case-insensitive.
    pub fn role_priority(&self, role: &str) -> Option<Priority> {
        self.config.role(role).map(|r| r.priority)
    }

    /// Look up a role. Case-insensitive.
    pub fn role(&self, role: &str) -> Option<&Role> {
        self.config.role(role)
    }

    /// All roles, most privileged first.
    pub fn roles(&self) -> &[Role] {
        self.config.roles()
    }

    /// The most privileged role.
    pub fn highest_role(&self) -> Option<&Role> {
        self.config.highest_role()
    }

    /// The least privileged role.
    pub fn lowest_role(&self) -> Option<&Role> {
        self.config.lowest_role()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether `role` may perform `operation` on `resource`.
    ///
    /// Granted iff the role is known, the resource is defined, and the role's
    /// priority is at least the rule's minimum. The bound is inclusive.
    /// Role matching ignores case; resource matching does not.
    pub fn has_permission(&self, role: &str, resource: &str, operation: Operation) -> bool {
        let Some(priority) = self.role_priority(role) else {
            return false;
        };

        match self.config.rule(resource, operation) {
            Some(rule) => priority >= rule.min_priority,
            None => false,
        }
    }

    /// Like [`has_permission`](Self::has_permission), with the operation
    /// given by name. Unknown or differently-cased operation names deny.
    pub fn has_permission_named(&self, role: &str, resource: &str, operation: &str) -> bool {
        match Operation::parse(operation) {
            Some(op) => self.has_permission(role, resource, op),
            None => false,
        }
    }

    /// Check whether `user_role` is at least as privileged as `required_role`.
    ///
    /// Reflexive: every known role meets itself. Unknown roles on either
    /// side deny.
    pub fn has_minimum_role(&self, user_role: &str, required_role: &str) -> bool {
        match (self.role_priority(user_role), self.role_priority(required_role)) {
            (Some(user), Some(required)) => user >= required,
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Matrix Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The least privileged role allowed to perform `operation` on `resource`.
    pub fn minimum_role(&self, resource: &str, operation: Operation) -> Option<&str> {
        let rule = self.config.rule(resource, operation)?;
        self.config
            .role_with_priority(rule.min_priority)
            .map(|r| r.name.as_str())
    }

    /// The rule for a (resource, operation) pair.
    pub fn rule(&self, resource: &str, operation: Operation) -> Option<&PermissionRule> {
        self.config.rule(resource, operation)
    }

    /// Resource names in sorted order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.config.resources()
    }

    /// Check whether a resource is defined. Case-sensitive.
    pub fn has_resource(&self, resource: &str) -> bool {
        self.config.has_resource(resource)
    }

    /// Everything a role may do, by resource.
    ///
    /// Operations are listed in canonical order. Resources where the role
    /// has no operation are omitted, and an unknown role gets an empty map.
    pub fn role_permissions(&self, role: &str) -> BTreeMap<String, Vec<Operation>> {
        let Some(priority) = self.role_priority(role) else {
            return BTreeMap::new();
        };

        self.config
            .matrix()
            .filter_map(|(resource, rules)| {
                let allowed: Vec<Operation> = rules
                    .iter()
                    .filter(|rule| priority >= rule.min_priority)
                    .map(|rule| rule.operation)
                    .collect();
                (!allowed.is_empty()).then(|| (resource.to_string(), allowed))
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row-Level Security
    // ─────────────────────────────────────────────────────────────────────────

    /// The row-level security policy for a (role, resource) pair.
    ///
    /// `None` means this engine imposes no row restriction, either because
    /// none is configured or because the role or resource is unknown.
    /// Case-insensitive on role.
    pub fn row_level_security(&self, role: &str, resource: &str) -> Option<&str> {
        let role = self.config.role(role)?;
        self.config.row_level_security(&role.name, resource)
    }
}
