//! # hexpet
//!
//! Mint and verify signed pets: small records carrying a 16-bit identifier
//! and a creation time, signed by a trusted issuer.
//!
//! ## Overview
//!
//! - **Minting**: a [`Minter`] owns a key pair and an identifier sampler and
//!   hands out signed pets
//! - **Verification**: anyone holding the public key can check that a pet is
//!   genuine and unmodified
//! - **Rarity**: identifiers follow a power law, so low values are common
//!
//! ## Usage
//!
//! ```rust
//! use hexpet::{Minter, MinterConfig};
//! use hexpet::core::{Ed25519Keypair, SamplerConfig};
//!
//! let config = MinterConfig {
//!     sampler: SamplerConfig::seeded(42),
//!     ..MinterConfig::default()
//! };
//! let mut minter = Minter::new(Ed25519Keypair::generate(), config).unwrap();
//!
//! let pet = minter.mint().unwrap();
//! assert!(minter.verify(&pet).is_ok());
//! println!("minted {}", pet.identifier);
//! ```
//!
//! ## Re-exports
//!
//! - `hexpet::core` - Core primitives (Pet, Sampler, key pairs, canonical encoding)

pub mod error;
pub mod minter;

// Re-export component crates
pub use hexpet_core as core;

// Re-export main types for convenience
pub use error::{MintError, Result};
pub use minter::{verify_with, Minter, MinterConfig};

// Re-export commonly used core types
pub use hexpet_core::{
    Ed25519Keypair, Ed25519PublicKey, Pet, PetError, PetId, PetSignature, PetSigner, PetVerifier,
    RsaKeypair, RsaVerifyingKey, Sampler, SamplerConfig, VerificationError,
};
