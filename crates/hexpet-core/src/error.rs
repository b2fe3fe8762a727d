//! Error types for hexpet core.

use thiserror::Error;

/// Core errors that can occur while sampling, encoding or signing pets.
#[derive(Debug, Error)]
pub enum PetError {
    /// The sampler could not be built. Draws themselves never fail.
    #[error("sampling failure: {0}")]
    SamplingFailure(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Errors returned by verification.
///
/// [`MissingSignature`](Self::MissingSignature) and
/// [`SignatureMismatch`](Self::SignatureMismatch) mean the pet is not
/// authentic under the given key. [`Unverifiable`](Self::Unverifiable) means
/// the check could not be carried out at all.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("pet carries no signature")]
    MissingSignature,

    #[error("signature verification failed")]
    SignatureMismatch,

    #[error("verification could not be attempted: {0}")]
    Unverifiable(#[from] PetError),
}

impl VerificationError {
    /// True when the pet was checked and found inauthentic.
    pub fn is_inauthentic(&self) -> bool {
        matches!(
            self,
            VerificationError::MissingSignature | VerificationError::SignatureMismatch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inauthentic_classification() {
        assert!(VerificationError::MissingSignature.is_inauthentic());
        assert!(VerificationError::SignatureMismatch.is_inauthentic());

        let structural: VerificationError = PetError::Serialization("boom".into()).into();
        assert!(!structural.is_inauthentic());
        assert!(matches!(
            structural,
            VerificationError::Unverifiable(PetError::Serialization(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = PetError::Signing("key too small".into());
        assert_eq!(err.to_string(), "signing error: key too small");

        let err = VerificationError::Unverifiable(PetError::InvalidKey("bad".into()));
        assert_eq!(
            err.to_string(),
            "verification could not be attempted: invalid key: bad"
        );
    }
}
