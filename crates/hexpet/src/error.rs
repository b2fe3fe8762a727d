//! Error types for minting.

use hexpet_core::{PetError, VerificationError};
use thiserror::Error;

/// Errors that can occur during Minter operations.
#[derive(Debug, Error)]
pub enum MintError {
    /// Sampling, encoding or signing failed.
    #[error("pet error: {0}")]
    Pet(#[from] PetError),

    /// A pet failed verification.
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),
}

impl MintError {
    /// True when a pet was checked and found inauthentic.
    pub fn is_inauthentic(&self) -> bool {
        match self {
            MintError::Verification(e) => e.is_inauthentic(),
            MintError::Pet(_) => false,
        }
    }
}

/// Result type for Minter operations.
pub type Result<T> = std::result::Result<T, MintError>;
