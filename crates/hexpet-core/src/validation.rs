//! Pet verification: structural checks and signature verification.

use crate::crypto::PetVerifier;
use crate::error::VerificationError;
use crate::pet::Pet;

/// Verify a pet's signature under `key`.
///
/// This performs:
/// - Structural check (signature present and non-empty)
/// - Canonical hash recomputation, signature excluded
/// - Signature verification against that exact hash
pub fn verify_pet<V: PetVerifier>(pet: &Pet, key: &V) -> Result<(), VerificationError> {
    // 1. Structure
    validate_pet_structure(pet)?;

    // 2. Recompute the signing input
    let digest = pet.canonical_hash()?;

    // 3. Verify signature
    let signature = pet
        .signature
        .as_ref()
        .ok_or(VerificationError::MissingSignature)?;
    key.verify_digest(&digest, signature)
}

/// Check a pet's structure without any cryptography.
///
/// Useful for rejecting obviously unsigned records before paying for a
/// signature check.
pub fn validate_pet_structure(pet: &Pet) -> Result<(), VerificationError> {
    match &pet.signature {
        Some(signature) if !signature.is_empty() => Ok(()),
        _ => Err(VerificationError::MissingSignature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Ed25519Keypair, PetSignature, PetSigner};
    use crate::types::PetId;
    use chrono::{TimeZone, Utc};

    fn signed_pet(keypair: &Ed25519Keypair) -> Pet {
        let mut pet = Pet::new(PetId(9), Utc.timestamp_opt(1_600_000_000, 42).unwrap());
        pet.sign(keypair).unwrap();
        pet
    }

    #[test]
    fn test_valid_pet() {
        let keypair = Ed25519Keypair::from_seed(&[1; 32]);
        let pet = signed_pet(&keypair);

        assert!(validate_pet_structure(&pet).is_ok());
        assert!(verify_pet(&pet, &keypair.public_key()).is_ok());
    }

    #[test]
    fn test_missing_signature() {
        let pet = Pet::new(PetId(9), Utc::now());
        assert!(matches!(
            validate_pet_structure(&pet),
            Err(VerificationError::MissingSignature)
        ));
    }

    #[test]
    fn test_empty_signature() {
        let keypair = Ed25519Keypair::from_seed(&[2; 32]);
        let mut pet = signed_pet(&keypair);
        pet.signature = Some(PetSignature::from(Vec::new()));

        let result = verify_pet(&pet, &keypair.public_key());
        assert!(matches!(result, Err(VerificationError::MissingSignature)));
    }

    #[test]
    fn test_garbage_signature_is_mismatch() {
        let keypair = Ed25519Keypair::from_seed(&[3; 32]);
        let mut pet = signed_pet(&keypair);
        pet.signature = Some(PetSignature::from(vec![0u8; 3]));

        let result = verify_pet(&pet, &keypair.public_key());
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_different_key() {
        let signer = Ed25519Keypair::from_seed(&[4; 32]);
        let other = Ed25519Keypair::from_seed(&[5; 32]);
        let pet = signed_pet(&signer);

        let err = verify_pet(&pet, &other.public_key()).unwrap_err();
        assert!(err.is_inauthentic());
    }
}
