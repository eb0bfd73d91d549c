//! The validated, immutable permission configuration.

use std::collections::{BTreeMap, HashMap};

use crate::document::PermissionDocument;
use crate::error::Result;
use crate::types::{normalize_role, Operation, Priority, Role};
use crate::validation::validate_document;

/// The canonical permission document shipped with the crate.
pub const EMBEDDED_PERMISSIONS: &str = include_str!("../config/permissions.json");

/// The rule for one (resource, operation) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRule {
    pub operation: Operation,

    /// Minimum role priority required. Always equals some role's priority.
    pub min_priority: Priority,

    pub description: Option<String>,
}

/// The four rules of one resource.
///
/// Indexed by [`Operation`], so a resource cannot be missing an operation
/// once it has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRules {
    rules: [PermissionRule; 4],
}

impl ResourceRules {
    pub(crate) fn new(rules: [PermissionRule; 4]) -> Self {
        Self { rules }
    }

    /// Get the rule for an operation.
    pub fn get(&self, operation: Operation) -> &PermissionRule {
        &self.rules[operation.index()]
    }

    /// Iterate rules in canonical operation order.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionRule> {
        self.rules.iter()
    }
}

/// A validated permission configuration.
///
/// Construct with [`PermissionConfig::from_json_str`],
/// [`PermissionConfig::from_document`] or [`PermissionConfig::embedded`].
/// There is no way to mutate one after construction.
#[derive(Debug, Clone)]
pub struct PermissionConfig {
    /// Roles sorted by descending priority.
    roles: Vec<Role>,

    /// Index: lower-cased role name -> position in `roles`.
    by_name: HashMap<String, usize>,

    /// Index: priority -> position in `roles`.
    by_priority: HashMap<Priority, usize>,

    /// Resource name -> rules.
    matrix: BTreeMap<String, ResourceRules>,

    /// Role name -> resource name -> policy identifier. Null entries are dropped.
    rls: HashMap<String, HashMap<String, String>>,

    /// Hex blake3 digest of the canonical rendering.
    fingerprint: String,
}

impl PermissionConfig {
    /// Parse and validate a JSON permission document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let doc = PermissionDocument::from_json_str(s)?;
        validate_document(&doc)
    }

    /// Parse and validate a JSON permission document from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let doc = PermissionDocument::from_slice(bytes)?;
        validate_document(&doc)
    }

    /// Validate an already-parsed document.
    pub fn from_document(doc: &PermissionDocument) -> Result<Self> {
        validate_document(doc)
    }

    /// Load the canonical permission document compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_PERMISSIONS)
    }

    pub(crate) fn assemble(
        mut roles: Vec<Role>,
        matrix: BTreeMap<String, ResourceRules>,
        rls: HashMap<String, HashMap<String, String>>,
    ) -> Self {
        roles.sort_by(|a, b| b.priority.cmp(&a.priority));

        let by_name = roles
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        let by_priority = roles
            .iter()
            .enumerate()
            .map(|(i, r)| (r.priority, i))
            .collect();

        let fingerprint = fingerprint(&roles, &matrix, &rls);

        Self {
            roles,
            by_name,
            by_priority,
            matrix,
            rls,
            fingerprint,
        }
    }

    /// All roles, most privileged first.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Look up a role by name, ignoring case.
    pub fn role(&self, name: &str) -> Option<&Role> {
        let key = normalize_role(name)?;
        self.by_name.get(&key).map(|&i| &self.roles[i])
    }

    /// Look up the role holding a priority.
    pub fn role_with_priority(&self, priority: Priority) -> Option<&Role> {
        self.by_priority.get(&priority).map(|&i| &self.roles[i])
    }

    /// The most privileged role.
    pub fn highest_role(&self) -> Option<&Role> {
        self.roles.first()
    }

    /// The least privileged role.
    pub fn lowest_role(&self) -> Option<&Role> {
        self.roles.last()
    }

    /// Resource names in sorted order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.matrix.keys().map(String::as_str)
    }

    /// Check whether a resource is defined. Case-sensitive.
    pub fn has_resource(&self, resource: &str) -> bool {
        self.matrix.contains_key(resource)
    }

    /// All rules of a resource.
    pub fn rules(&self, resource: &str) -> Option<&ResourceRules> {
        self.matrix.get(resource)
    }

    /// The rule for a (resource, operation) pair.
    pub fn rule(&self, resource: &str, operation: Operation) -> Option<&PermissionRule> {
        self.rules(resource).map(|rules| rules.get(operation))
    }

    /// Iterate the full matrix in resource order.
    pub fn matrix(&self) -> impl Iterator<Item = (&str, &ResourceRules)> {
        self.matrix.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Row-level security policy for a (role, resource) pair.
    ///
    /// `role` must already be a configured (lower-cased) role name.
    pub fn row_level_security(&self, role: &str, resource: &str) -> Option<&str> {
        self.rls
            .get(role)
            .and_then(|by_resource| by_resource.get(resource))
            .map(String::as_str)
    }

    /// Deterministic digest of the validated configuration.
    ///
    /// Two runtimes that loaded the same canonical document report the same
    /// fingerprint. Descriptions do not contribute.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(
    roles: &[Role],
    matrix: &BTreeMap<String, ResourceRules>,
    rls: &HashMap<String, HashMap<String, String>>,
) -> String {
    let mut buf = String::new();

    for role in roles {
        buf.push_str(&format!("role\t{}\t{}\n", role.name, role.priority));
    }

    for (resource, rules) in matrix {
        for rule in rules.iter() {
            buf.push_str(&format!(
                "rule\t{}\t{}\t{}\n",
                resource, rule.operation, rule.min_priority
            ));
        }
    }

    let mut policies: Vec<(&str, &str, &str)> = rls
        .iter()
        .flat_map(|(role, by_resource)| {
            by_resource
                .iter()
                .map(move |(resource, policy)| (role.as_str(), resource.as_str(), policy.as_str()))
        })
        .collect();
    policies.sort_unstable();
    for (role, resource, policy) in policies {
        buf.push_str(&format!("rls\t{}\t{}\t{}\n", role, resource, policy));
    }

    hex::encode(blake3::hash(buf.as_bytes()).as_bytes())
}
