//! Golden parity vectors for cross-runtime verification.
//!
//! Every implementation of the permission engine (backend and frontend)
//! must produce the same answer for each vector when loaded with
//! [`reference_document`](crate::fixtures::reference_document). The vectors
//! export as JSON so a non-Rust test suite can consume the same table.

use serde::Serialize;

use tross_perms::PermissionService;

use crate::fixtures::reference_document;

/// One expected decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// `has_permission(role, resource, operation) == expected`
    Permission {
        role: Option<&'static str>,
        resource: &'static str,
        operation: &'static str,
        expected: bool,
    },

    /// `has_minimum_role(user, required) == expected`
    MinimumRole {
        user: Option<&'static str>,
        required: &'static str,
        expected: bool,
    },

    /// `role_priority(role) == expected`
    Priority {
        role: Option<&'static str>,
        expected: Option<u32>,
    },

    /// `minimum_role(resource, operation) == expected`
    MinimumRoleFor {
        resource: &'static str,
        operation: &'static str,
        expected: Option<&'static str>,
    },

    /// `row_level_security(role, resource) == expected`
    RowLevelSecurity {
        role: Option<&'static str>,
        resource: &'static str,
        expected: Option<&'static str>,
    },
}

/// A named golden vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,

    #[serde(flatten)]
    pub check: Check,
}

const fn permission(
    name: &'static str,
    role: Option<&'static str>,
    resource: &'static str,
    operation: &'static str,
    expected: bool,
) -> GoldenVector {
    GoldenVector {
        name,
        check: Check::Permission {
            role,
            resource,
            operation,
            expected,
        },
    }
}

/// Get all golden vectors.
#[rustfmt::skip]
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        // Inclusive boundary on work_orders.delete (minimum priority 4)
        permission("dispatcher cannot delete work orders", Some("dispatcher"), "work_orders", "delete", false),
        permission("manager can delete work orders", Some("manager"), "work_orders", "delete", true),
        permission("role match ignores case", Some("MANAGER"), "work_orders", "delete", true),
        permission("mixed case role", Some("Admin"), "audit_logs", "read", true),
        // Lowest role gets exactly its grants
        permission("client creates work orders", Some("client"), "work_orders", "create", true),
        permission("client reads work orders", Some("client"), "work_orders", "read", true),
        permission("client cannot update work orders", Some("client"), "work_orders", "update", false),
        permission("client reads roles", Some("client"), "roles", "read", true),
        permission("client cannot read users", Some("client"), "users", "read", false),
        permission("manager reads users", Some("manager"), "users", "read", true),
        permission("manager cannot create users", Some("manager"), "users", "create", false),
        permission("only admin reads audit logs", Some("manager"), "audit_logs", "read", false),
        // Fail closed
        permission("unknown role", Some("superadmin"), "users", "read", false),
        permission("unknown resource", Some("admin"), "unknown_resource", "read", false),
        permission("missing role", None, "users", "read", false),
        permission("empty role", Some(""), "users", "read", false),
        permission("padded role", Some(" admin "), "users", "read", false),
        permission("resource is case-sensitive", Some("admin"), "USERS", "read", false),
        permission("operation is case-sensitive", Some("admin"), "users", "READ", false),
        permission("unknown operation", Some("admin"), "users", "export", false),
        permission("empty resource", Some("admin"), "", "read", false),
        GoldenVector {
            name: "hierarchy above",
            check: Check::MinimumRole { user: Some("admin"), required: "technician", expected: true },
        },
        GoldenVector {
            name: "hierarchy reflexive",
            check: Check::MinimumRole { user: Some("Dispatcher"), required: "dispatcher", expected: true },
        },
        GoldenVector {
            name: "hierarchy below",
            check: Check::MinimumRole { user: Some("client"), required: "technician", expected: false },
        },
        GoldenVector {
            name: "hierarchy unknown required",
            check: Check::MinimumRole { user: Some("admin"), required: "owner", expected: false },
        },
        GoldenVector {
            name: "hierarchy missing user",
            check: Check::MinimumRole { user: None, required: "client", expected: false },
        },
        GoldenVector {
            name: "priority of top role",
            check: Check::Priority { role: Some("ADMIN"), expected: Some(5) },
        },
        GoldenVector {
            name: "priority of bottom role",
            check: Check::Priority { role: Some("client"), expected: Some(1) },
        },
        GoldenVector {
            name: "priority of unknown role",
            check: Check::Priority { role: Some("guest"), expected: None },
        },
        GoldenVector {
            name: "priority of padded role",
            check: Check::Priority { role: Some(" admin "), expected: None },
        },
        GoldenVector {
            name: "priority of missing role",
            check: Check::Priority { role: None, expected: None },
        },
        GoldenVector {
            name: "minimum role for work order delete",
            check: Check::MinimumRoleFor { resource: "work_orders", operation: "delete", expected: Some("manager") },
        },
        GoldenVector {
            name: "minimum role for work order create",
            check: Check::MinimumRoleFor { resource: "work_orders", operation: "create", expected: Some("client") },
        },
        GoldenVector {
            name: "minimum role for unknown resource",
            check: Check::MinimumRoleFor { resource: "invoices", operation: "read", expected: None },
        },
        GoldenVector {
            name: "rls for client work orders",
            check: Check::RowLevelSecurity { role: Some("client"), resource: "work_orders", expected: Some("own_work_orders_only") },
        },
        GoldenVector {
            name: "rls ignores role case",
            check: Check::RowLevelSecurity { role: Some("Technician"), resource: "work_orders", expected: Some("assigned_work_orders_only") },
        },
        GoldenVector {
            name: "rls explicit null",
            check: Check::RowLevelSecurity { role: Some("dispatcher"), resource: "work_orders", expected: None },
        },
        GoldenVector {
            name: "rls absent entry",
            check: Check::RowLevelSecurity { role: Some("admin"), resource: "users", expected: None },
        },
        GoldenVector {
            name: "rls unknown role",
            check: Check::RowLevelSecurity { role: Some("ghost"), resource: "work_orders", expected: None },
        },
        GoldenVector {
            name: "rls unknown resource",
            check: Check::RowLevelSecurity { role: Some("client"), resource: "invoices", expected: None },
        },
    ]
}

impl Check {
    /// Evaluate this check against a service. Returns whether it held.
    pub fn holds(&self, service: &PermissionService) -> bool {
        let engine = service.engine();
        match *self {
            Check::Permission {
                role,
                resource,
                operation,
                expected,
            } => service.can_perform(role, resource, operation) == expected,
            Check::MinimumRole {
                user,
                required,
                expected,
            } => service.meets_minimum_role(user, required) == expected,
            Check::Priority { role, expected } => {
                service.priority(role).map(|p| p.get()) == expected
            }
            Check::MinimumRoleFor {
                resource,
                operation,
                expected,
            } => {
                let actual = tross_perms::Operation::parse(operation)
                    .and_then(|op| engine.minimum_role(resource, op));
                actual == expected
            }
            Check::RowLevelSecurity {
                role,
                resource,
                expected,
            } => service.row_level_security(role, resource) == expected,
        }
    }
}

/// Run every vector against a service.
///
/// Returns `(name, passed)` for each vector.
pub fn verify_all_vectors(service: &PermissionService) -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| (v.name.to_string(), v.check.holds(service)))
        .collect()
}

#[derive(Serialize)]
struct ParityBundle {
    fixture: tross_perms::PermissionDocument,
    vectors: Vec<GoldenVector>,
}

/// Export the reference document and all vectors as one JSON document.
///
/// The output is the shared fixture another runtime's test suite loads.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ParityBundle {
        fixture: reference_document(),
        vectors: all_vectors(),
    })
}
