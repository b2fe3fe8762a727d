//! # hexpet Core
//!
//! Pure primitives for hexpet: identifier sampling, canonical encoding,
//! signing and verification of pets.
//!
//! This crate contains no I/O, no storage, no logging. It is pure computation
//! over small signed records.
//!
//! ## Key Types
//!
//! - [`Pet`] - The signed record: identifier, creation time, signature
//! - [`PetId`] - The 16-bit identifier
//! - [`Sampler`] - Power-law identifier generator
//! - [`PetSigner`] / [`PetVerifier`] - The key seam; see [`RsaKeypair`] and [`Ed25519Keypair`]
//!
//! ## Canonicalization
//!
//! The signing input is the deterministic CBOR encoding of a pet with its
//! signature omitted. See the [`canonical`] module.
//!
//! ```rust
//! use hexpet_core::{Ed25519Keypair, Pet, PetSigner, Sampler};
//!
//! let keypair = Ed25519Keypair::from_seed(&[7; 32]);
//! let mut sampler = Sampler::from_seed(42);
//!
//! let pet = Pet::generate(&mut sampler, &keypair).unwrap();
//! assert!(pet.verify(&keypair.public_key()).is_ok());
//! ```

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod pet;
pub mod sampler;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, canonical_unsigned_bytes, decode_pet};
pub use crypto::{
    Ed25519Keypair, Ed25519PublicKey, PetSignature, PetSigner, PetVerifier, RsaKeypair,
    RsaVerifyingKey, Sha256Digest, DEFAULT_RSA_BITS,
};
pub use error::{PetError, VerificationError};
pub use pet::Pet;
pub use sampler::{Sampler, SamplerConfig, Zipf};
pub use types::PetId;
pub use validation::{validate_pet_structure, verify_pet};
