//! The pet record and its sign/verify lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_bytes, canonical_unsigned_bytes, decode_pet};
use crate::crypto::{PetSignature, PetSigner, PetVerifier, Sha256Digest};
use crate::error::{PetError, VerificationError};
use crate::sampler::Sampler;
use crate::types::PetId;
use crate::validation::verify_pet;

/// A signed rarity record.
///
/// Created complete and unsigned, then signed once before distribution. When
/// present, `signature` covers the SHA-256 of the canonical encoding with the
/// signature itself left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Pet {
    pub identifier: PetId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<PetSignature>,
}

impl Pet {
    /// Create an unsigned pet.
    pub fn new(identifier: PetId, created_at: DateTime<Utc>) -> Self {
        Self {
            identifier,
            created_at,
            signature: None,
        }
    }

    /// Draw an identifier, stamp the current time and sign.
    ///
    /// Either returns a fully signed pet or an error; nothing half-built
    /// escapes.
    pub fn generate<S: PetSigner>(sampler: &mut Sampler, signer: &S) -> Result<Self, PetError> {
        let mut pet = Self::new(sampler.next_id(), Utc::now());
        pet.sign(signer)?;
        Ok(pet)
    }

    /// SHA-256 of the canonical encoding without the signature.
    pub fn canonical_hash(&self) -> Result<Sha256Digest, PetError> {
        let bytes = canonical_unsigned_bytes(self)?;
        Ok(Sha256Digest::hash(&bytes))
    }

    /// Sign the pet, replacing any existing signature.
    ///
    /// The signature field is only written once signing has succeeded.
    pub fn sign<S: PetSigner>(&mut self, signer: &S) -> Result<(), PetError> {
        let digest = self.canonical_hash()?;
        let signature = signer.sign_digest(&digest)?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Verify the signature under `key`.
    pub fn verify<V: PetVerifier>(&self, key: &V) -> Result<(), VerificationError> {
        verify_pet(self, key)
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Canonical binary form, signature included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PetError> {
        canonical_bytes(self)
    }

    /// Parse the canonical binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PetError> {
        decode_pet(bytes)
    }

    /// JSON distribution form.
    pub fn to_json(&self) -> Result<String, PetError> {
        serde_json::to_string(self).map_err(|e| PetError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PetError> {
        serde_json::from_str(json).map_err(|e| PetError::Decoding(e.to_string()))
    }
}
