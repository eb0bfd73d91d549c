//! Strong type definitions for the permission model.
//!
//! Operations are a closed set known at compile time. Roles and resources
//! stay configurable, so they are validated strings rather than enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four CRUD verbs a permission rule can govern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// All operations in canonical order.
    pub const ALL: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    /// The wire name of this operation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Parse an operation name.
    ///
    /// Matching is exact and case-sensitive: `"READ"` is not an operation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Operation::Create),
            "read" => Some(Operation::Read),
            "update" => Some(Operation::Update),
            "delete" => Some(Operation::Delete),
            _ => None,
        }
    }

    /// Position of this operation within [`Operation::ALL`].
    pub(crate) const fn index(&self) -> usize {
        match self {
            Operation::Create => 0,
            Operation::Read => 1,
            Operation::Update => 2,
            Operation::Delete => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role priority. Higher values are more privileged.
///
/// Validated configs only contain priorities `>= 1`, and no two roles
/// share one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u32);

impl Priority {
    /// Get the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Priority {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A named actor category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Lower-cased role name.
    pub name: String,

    /// Unique priority of this role.
    pub priority: Priority,

    /// Optional human-readable description.
    pub description: Option<String>,
}

/// Normalize a role name for lookup.
///
/// Only case is normalized. Surrounding whitespace is kept, so `" admin "`
/// never matches a configured role. Empty input yields `None`.
pub fn normalize_role(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_operation_parse_is_exact() {
        assert_eq!(Operation::parse("read"), Some(Operation::Read));
        assert_eq!(Operation::parse("delete"), Some(Operation::Delete));
        assert_eq!(Operation::parse("READ"), None);
        assert_eq!(Operation::parse(" read"), None);
        assert_eq!(Operation::parse(""), None);
        assert_eq!(Operation::parse("execute"), None);
    }

    #[test]
    fn test_operation_order() {
        let names: Vec<_> = Operation::ALL.iter().map(|op| op.as_str()).collect();
        assert_eq!(names, ["create", "read", "update", "delete"]);

        for (i, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(op.index(), i);
        }
    }

    #[test]
    fn test_operation_serde_lowercase() {
        let json = serde_json::to_string(&Operation::Update).unwrap();
        assert_eq!(json, "\"update\"");
        let op: Operation = serde_json::from_str("\"create\"").unwrap();
        assert_eq!(op, Operation::Create);
    }

    #[test]
    fn test_normalize_role() {
        assert_eq!(normalize_role("MANAGER").as_deref(), Some("manager"));
        assert_eq!(normalize_role("Admin").as_deref(), Some("admin"));
        assert_eq!(normalize_role(" admin ").as_deref(), Some(" admin "));
        assert_eq!(normalize_role(""), None);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(format!("{}", Priority(4)), "4");
        assert_eq!(format!("{:?}", Priority(4)), "Priority(4)");
        assert!(Priority(5) > Priority(4));
    }

    proptest! {
        #[test]
        fn test_normalize_role_idempotent(name in "[A-Za-z_]{1,16}") {
            let once = normalize_role(&name).unwrap();
            prop_assert_eq!(normalize_role(&once), Some(once.clone()));
        }

        #[test]
        fn test_parse_round_trips_wire_names(op in prop_oneof![
            Just(Operation::Create),
            Just(Operation::Read),
            Just(Operation::Update),
            Just(Operation::Delete),
        ]) {
            prop_assert_eq!(Operation::parse(op.as_str()), Some(op));
        }
    }
}
