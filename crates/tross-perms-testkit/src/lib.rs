//! # Tross Permissions Testkit
//!
//! Testing utilities for the TrossApp permission engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Expected decisions over a reference document, shared
//!   with every other runtime that implements the engine
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors keep backend and frontend decisions identical:
//!
//! ```rust
//! use tross_perms_testkit::{verify_all_vectors, TestFixture};
//!
//! let fixture = TestFixture::new();
//! for (name, passed) in verify_all_vectors(&fixture.service) {
//!     assert!(passed, "{}", name);
//! }
//! ```
//!
//! Export the same table for another runtime with [`vectors_json`].
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tross_perms_testkit::generators::{operation, valid_document};
//!
//! proptest! {
//!     #[test]
//!     fn top_role_can_do_anything(doc in valid_document(), op in operation()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{reference_document, TestFixture, REFERENCE_ROLES};
pub use generators::{case_variant, junk_text, operation, valid_document};
pub use vectors::{all_vectors, vectors_json, verify_all_vectors, Check, GoldenVector};
