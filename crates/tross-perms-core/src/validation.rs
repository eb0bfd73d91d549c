//! Load-time validation of a permission document.
//!
//! This is the only place the permission model raises errors. Once a
//! [`PermissionConfig`] exists, every lookup against it is total.

use std::collections::{BTreeMap, HashMap};

use crate::config::{PermissionConfig, PermissionRule, ResourceRules};
use crate::document::{PermissionDocument, RuleEntry};
use crate::error::{ConfigError, Result};
use crate::types::{Operation, Priority, Role};

/// Validate a document and build the immutable configuration.
///
/// This performs:
/// - Role checks (non-empty set, well-formed unique names, positive unique priorities)
/// - Matrix checks (every resource defines exactly the four CRUD operations)
/// - Reference checks (every minimum priority belongs to a role)
/// - Row-level security checks (known roles and resources only)
pub fn validate_document(doc: &PermissionDocument) -> Result<PermissionConfig> {
    // 1. Roles
    if doc.roles.is_empty() {
        return Err(ConfigError::NoRoles);
    }

    let mut roles: Vec<Role> = Vec::with_capacity(doc.roles.len());
    let mut priority_owner: HashMap<Priority, String> = HashMap::new();

    for (raw_name, entry) in &doc.roles {
        if !is_well_formed_name(raw_name) {
            return Err(ConfigError::InvalidRoleName(raw_name.clone()));
        }

        let name = raw_name.to_lowercase();
        if roles.iter().any(|r| r.name == name) {
            return Err(ConfigError::DuplicateRole(name));
        }

        if entry.priority == 0 {
            return Err(ConfigError::InvalidPriority {
                role: name,
                priority: entry.priority,
            });
        }

        let priority = Priority(entry.priority);
        if let Some(first) = priority_owner.get(&priority) {
            return Err(ConfigError::DuplicatePriority {
                priority,
                first: first.clone(),
                second: name,
            });
        }
        priority_owner.insert(priority, name.clone());

        roles.push(Role {
            name,
            priority,
            description: entry.description.clone(),
        });
    }

    // 2. Permission matrix
    if doc.permissions.is_empty() {
        return Err(ConfigError::NoResources);
    }

    let mut matrix = BTreeMap::new();
    for (resource, operations) in &doc.permissions {
        if !is_well_formed_name(resource) {
            return Err(ConfigError::InvalidResourceName(resource.clone()));
        }

        if let Some(unknown) = operations.keys().find(|k| Operation::parse(k).is_none()) {
            return Err(ConfigError::UnknownOperation {
                resource: resource.clone(),
                operation: unknown.clone(),
            });
        }

        let rules = Operation::ALL.map(|operation| {
            validate_rule(resource, operation, operations.get(operation.as_str()), &priority_owner)
        });
        let [create, read, update, delete] = rules;
        matrix.insert(
            resource.clone(),
            ResourceRules::new([create?, read?, update?, delete?]),
        );
    }

    // 3. Row-level security
    let mut rls: HashMap<String, HashMap<String, String>> = HashMap::new();
    for (raw_role, by_resource) in &doc.row_level_security {
        let role = raw_role.to_lowercase();
        if !roles.iter().any(|r| r.name == role) {
            return Err(ConfigError::RlsUnknownRole(raw_role.clone()));
        }

        for (resource, policy) in by_resource {
            if !matrix.contains_key(resource) {
                return Err(ConfigError::RlsUnknownResource {
                    role,
                    resource: resource.clone(),
                });
            }

            if let Some(policy) = policy {
                rls.entry(role.clone())
                    .or_default()
                    .insert(resource.clone(), policy.clone());
            }
        }
    }

    Ok(PermissionConfig::assemble(roles, matrix, rls))
}

fn validate_rule(
    resource: &str,
    operation: Operation,
    entry: Option<&RuleEntry>,
    priority_owner: &HashMap<Priority, String>,
) -> Result<PermissionRule> {
    let entry = entry.ok_or_else(|| ConfigError::MissingOperation {
        resource: resource.to_string(),
        operation,
    })?;

    let min_priority = Priority(entry.minimum_priority);
    let owner = priority_owner
        .get(&min_priority)
        .ok_or_else(|| ConfigError::DanglingPriority {
            resource: resource.to_string(),
            operation,
            priority: min_priority,
        })?;

    if let Some(named) = &entry.minimum_role {
        if named.to_lowercase() != *owner {
            return Err(ConfigError::MinimumRoleMismatch {
                resource: resource.to_string(),
                operation,
                role: named.clone(),
                priority: min_priority,
            });
        }
    }

    Ok(PermissionRule {
        operation,
        min_priority,
        description: entry.description.clone(),
    })
}

fn is_well_formed_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_doc() -> PermissionDocument {
        PermissionDocument::default()
            .with_role("admin", 3)
            .with_role("staff", 2)
            .with_role("guest", 1)
            .with_resource("reports", [2, 1, 2, 3])
    }

    #[test]
    fn test_valid_document() {
        let config = validate_document(&base_doc()).unwrap();
        assert_eq!(config.roles().len(), 3);
        assert_eq!(config.resources().collect::<Vec<_>>(), ["reports"]);
    }

    #[test]
    fn test_no_roles() {
        let doc = PermissionDocument::default().with_resource("reports", [1, 1, 1, 1]);
        assert!(matches!(validate_document(&doc), Err(ConfigError::NoRoles)));
    }

    #[test]
    fn test_no_resources() {
        let doc = PermissionDocument::default().with_role("admin", 1);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::NoResources)
        ));
    }

    #[test]
    fn test_duplicate_priority() {
        let doc = base_doc().with_role("auditor", 2);
        match validate_document(&doc) {
            Err(ConfigError::DuplicatePriority { priority, .. }) => {
                assert_eq!(priority, Priority(2));
            }
            other => panic!("expected DuplicatePriority, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_priority() {
        let doc = base_doc().with_role("nobody", 0);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::InvalidPriority { priority: 0, .. })
        ));
    }

    #[test]
    fn test_case_variant_role_is_duplicate() {
        let doc = base_doc().with_role("Admin", 9);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::DuplicateRole(name)) if name == "admin"
        ));
    }

    #[test]
    fn test_role_names_are_lowercased() {
        let doc = PermissionDocument::default()
            .with_role("Owner", 1)
            .with_resource("reports", [1, 1, 1, 1]);
        let config = validate_document(&doc).unwrap();
        assert_eq!(config.roles()[0].name, "owner");
    }

    #[test]
    fn test_whitespace_role_name() {
        let doc = base_doc().with_role(" admin ", 7);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::InvalidRoleName(_))
        ));
    }

    #[test]
    fn test_empty_resource_name() {
        let doc = base_doc().with_resource("", [1, 1, 1, 1]);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::InvalidResourceName(_))
        ));
    }

    #[test]
    fn test_missing_operation() {
        let doc = base_doc()
            .with_rule("invoices", "create", 2)
            .with_rule("invoices", "read", 1)
            .with_rule("invoices", "update", 2);
        match validate_document(&doc) {
            Err(ConfigError::MissingOperation {
                resource,
                operation,
            }) => {
                assert_eq!(resource, "invoices");
                assert_eq!(operation, Operation::Delete);
            }
            other => panic!("expected MissingOperation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_operation() {
        let doc = base_doc().with_rule("reports", "export", 2);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::UnknownOperation { operation, .. }) if operation == "export"
        ));
    }

    #[test]
    fn test_uppercase_operation_is_unknown() {
        let doc = base_doc().with_rule("reports", "READ", 1);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::UnknownOperation { .. })
        ));
    }

    #[test]
    fn test_dangling_priority() {
        let doc = base_doc().with_rule("reports", "delete", 4);
        match validate_document(&doc) {
            Err(ConfigError::DanglingPriority {
                operation,
                priority,
                ..
            }) => {
                assert_eq!(operation, Operation::Delete);
                assert_eq!(priority, Priority(4));
            }
            other => panic!("expected DanglingPriority, got {:?}", other),
        }
    }

    #[test]
    fn test_minimum_role_must_match_priority() {
        let mut doc = base_doc();
        if let Some(rule) = doc
            .permissions
            .get_mut("reports")
            .and_then(|ops| ops.get_mut("read"))
        {
            rule.minimum_role = Some("staff".into());
        }
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::MinimumRoleMismatch { .. })
        ));

        let mut doc = base_doc();
        if let Some(rule) = doc
            .permissions
            .get_mut("reports")
            .and_then(|ops| ops.get_mut("read"))
        {
            rule.minimum_role = Some("GUEST".into());
        }
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_rls_unknown_role() {
        let doc = base_doc().with_rls("superadmin", "reports", Some("x"));
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::RlsUnknownRole(_))
        ));
    }

    #[test]
    fn test_rls_unknown_resource() {
        let doc = base_doc().with_rls("guest", "invoices", None);
        assert!(matches!(
            validate_document(&doc),
            Err(ConfigError::RlsUnknownResource { .. })
        ));
    }

    #[test]
    fn test_rls_role_matched_case_insensitively() {
        let doc = base_doc().with_rls("Guest", "reports", Some("public_only"));
        let config = validate_document(&doc).unwrap();
        assert_eq!(
            config.row_level_security("guest", "reports"),
            Some("public_only")
        );
    }

    #[test]
    fn test_embedded_document_is_valid() {
        let doc = PermissionDocument::from_json_str(crate::config::EMBEDDED_PERMISSIONS).unwrap();
        let config = validate_document(&doc).unwrap();

        for (_, rules) in config.matrix() {
            assert_eq!(rules.iter().count(), 4);
        }
    }
}
