//! Proptest generators for property-based testing.

use proptest::prelude::*;

use tross_perms::{Operation, PermissionDocument};

/// Generate an operation.
pub fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Create),
        Just(Operation::Read),
        Just(Operation::Update),
        Just(Operation::Delete),
    ]
}

/// Generate a random casing of `name`.
pub fn case_variant(name: String) -> impl Strategy<Value = String> {
    let len = name.chars().count();
    prop::collection::vec(any::<bool>(), len).prop_map(move |upper| {
        name.chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

/// Generate arbitrary text, including empty and whitespace-padded strings.
pub fn junk_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "\\PC{0,24}",
        "[a-z_]{1,12}".prop_map(|s| format!(" {} ", s)),
    ]
}

/// Generate a valid permission document.
///
/// Roles are named `role0..` with distinct priorities drawn from `1..=20`.
/// Resources are named `resource0..` and every rule references one of the
/// role priorities, so the document always passes validation.
pub fn valid_document() -> impl Strategy<Value = PermissionDocument> {
    (
        prop::sample::subsequence((1u32..=20).collect::<Vec<_>>(), 1..=6),
        1usize..=5,
    )
        .prop_flat_map(|(priorities, resource_count)| {
            let rules = prop::collection::vec(
                prop::array::uniform4(prop::sample::select(priorities.clone())),
                resource_count,
            );
            (Just(priorities), rules)
        })
        .prop_map(|(priorities, rules)| {
            let mut doc = PermissionDocument::default();
            for (i, priority) in priorities.into_iter().enumerate() {
                doc = doc.with_role(format!("role{}", i), priority);
            }
            for (i, rule) in rules.into_iter().enumerate() {
                doc = doc.with_resource(format!("resource{}", i), rule);
            }
            doc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tross_perms::PermissionConfig;

    proptest! {
        #[test]
        fn test_valid_document_validates(doc in valid_document()) {
            prop_assert!(PermissionConfig::from_document(&doc).is_ok());
        }

        #[test]
        fn test_case_variant_preserves_letters(variant in case_variant("dispatcher".to_string())) {
            prop_assert_eq!(variant.to_lowercase(), "dispatcher");
        }
    }
}
