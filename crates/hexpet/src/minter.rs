//! The Minter: a key pair and an identifier sampler behind one API.
//!
//! A Minter is the issuer side. It owns the private key and the sampler
//! state; verification only needs the public half and can happen anywhere.

use hexpet_core::{Pet, PetSigner, PetVerifier, Sampler, SamplerConfig};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Configuration for the Minter.
#[derive(Debug, Clone, PartialEq)]
pub struct MinterConfig {
    /// Identifier sampler configuration.
    pub sampler: SamplerConfig,
    /// Whether to verify every pet against the public key before returning it.
    pub verify_after_mint: bool,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            verify_after_mint: true,
        }
    }
}

/// The issuer.
///
/// Minting advances the sampler and so takes `&mut self`; wrap the Minter in
/// a mutex to share it between threads.
pub struct Minter<K: PetSigner> {
    /// The signing key pair.
    keypair: K,
    /// Cached public half of `keypair`.
    public_key: K::PublicKey,
    /// The identifier sampler.
    sampler: Sampler,
    /// Configuration.
    config: MinterConfig,
}

impl<K: PetSigner> Minter<K> {
    /// Create a new minter. Fails only if the sampler configuration is invalid.
    pub fn new(keypair: K, config: MinterConfig) -> Result<Self> {
        let sampler = Sampler::new(config.sampler.clone())?;
        debug!(seed = sampler.seed(), "sampler ready");

        Ok(Self {
            public_key: keypair.public_key(),
            keypair,
            sampler,
            config,
        })
    }

    /// Get the verification key for pets minted here.
    pub fn public_key(&self) -> &K::PublicKey {
        &self.public_key
    }

    /// Get the signing key pair.
    pub fn keypair(&self) -> &K {
        &self.keypair
    }

    /// The sampler seed, for replaying a run.
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    pub fn config(&self) -> &MinterConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Minting
    // ─────────────────────────────────────────────────────────────────────────

    /// Mint one signed pet.
    pub fn mint(&mut self) -> Result<Pet> {
        let pet = Pet::generate(&mut self.sampler, &self.keypair)?;
        debug!(identifier = %pet.identifier, "minted pet");

        if self.config.verify_after_mint {
            self.verify(&pet)?;
        }

        Ok(pet)
    }

    /// Mint `count` signed pets. Stops at the first failure.
    pub fn mint_batch(&mut self, count: usize) -> Result<Vec<Pet>> {
        let pets = (0..count)
            .map(|_| self.mint())
            .collect::<Result<Vec<_>>>()?;

        let rarest = pets.iter().map(|pet| pet.identifier).max();
        info!(count = pets.len(), rarest = ?rarest, "minted batch");
        Ok(pets)
    }

    /// Sign an existing pet with this minter's key.
    ///
    /// A pet that is already signed gets its signature replaced.
    pub fn sign(&self, pet: &mut Pet) -> Result<()> {
        if pet.is_signed() {
            debug!(identifier = %pet.identifier, "replacing existing signature");
        }
        pet.sign(&self.keypair)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify a pet against this minter's public key.
    pub fn verify(&self, pet: &Pet) -> Result<()> {
        verify_with(&self.public_key, pet)
    }
}

/// Verify a pet against any public key, logging failures.
pub fn verify_with<V: PetVerifier>(key: &V, pet: &Pet) -> Result<()> {
    pet.verify(key).map_err(|e| {
        warn!(identifier = %pet.identifier, error = %e, "pet failed verification");
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MintError;
    use hexpet_core::{Ed25519Keypair, PetError, PetId};

    fn seeded_minter(seed: u64) -> Minter<Ed25519Keypair> {
        let config = MinterConfig {
            sampler: SamplerConfig::seeded(seed),
            ..MinterConfig::default()
        };
        Minter::new(Ed25519Keypair::from_seed(&[seed as u8; 32]), config).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MinterConfig::default();
        assert!(config.verify_after_mint);
        assert_eq!(config.sampler, SamplerConfig::default());
    }

    #[test]
    fn test_mint_verifies() {
        let mut minter = seeded_minter(1);
        let pet = minter.mint().unwrap();

        assert!(pet.is_signed());
        minter.verify(&pet).unwrap();
    }

    #[test]
    fn test_mint_follows_seed() {
        let mut minter = seeded_minter(2);
        assert_eq!(minter.seed(), 2);

        let expected: Vec<PetId> = Sampler::from_seed(2).take(8).collect();
        let ids: Vec<PetId> = minter
            .mint_batch(8)
            .unwrap()
            .iter()
            .map(|pet| pet.identifier)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_invalid_sampler_config() {
        let config = MinterConfig {
            sampler: SamplerConfig {
                exponent: 0.5,
                ..SamplerConfig::default()
            },
            ..MinterConfig::default()
        };
        let result = Minter::new(Ed25519Keypair::generate(), config);
        assert!(matches!(
            result,
            Err(MintError::Pet(PetError::SamplingFailure(_)))
        ));
    }

    #[test]
    fn test_verify_foreign_pet() {
        let mut issuer = seeded_minter(3);
        let other = seeded_minter(4);

        let pet = issuer.mint().unwrap();
        let err = other.verify(&pet).unwrap_err();
        assert!(err.is_inauthentic());
    }

    #[test]
    fn test_sign_replaces_signature() {
        let mut issuer = seeded_minter(5);
        let other = seeded_minter(6);

        let mut pet = issuer.mint().unwrap();
        other.sign(&mut pet).unwrap();

        other.verify(&pet).unwrap();
        assert!(issuer.verify(&pet).is_err());
    }
}
