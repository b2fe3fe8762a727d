//! # hexpet Testkit
//!
//! Testing utilities for hexpet.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known pets with expected encodings, digests and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Seeded key pairs and samplers for integration tests
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding across implementations:
//!
//! ```rust
//! use hexpet_testkit::vectors::{all_vectors, pet_from_vector};
//!
//! for vector in all_vectors() {
//!     let pet = pet_from_vector(&vector);
//!     let digest = pet.canonical_hash().unwrap();
//!     assert_eq!(digest.to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use hexpet_testkit::generators::{pet_from_params, PetParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: PetParams) {
//!         let p1 = pet_from_params(&params);
//!         let p2 = pet_from_params(&params);
//!         prop_assert_eq!(p1.canonical_hash().unwrap(), p2.canonical_hash().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use hexpet_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::with_seed(7);
//! let pet = fixture.make_pet();
//! assert!(pet.verify(&fixture.public_key()).is_ok());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{pet_from_params, PetParams};
pub use vectors::{all_vectors, pet_from_vector, verify_all_vectors, GoldenVector};
