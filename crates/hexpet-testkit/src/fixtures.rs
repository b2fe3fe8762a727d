//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use chrono::{DateTime, Utc};
use hexpet::{Minter, MinterConfig};
use hexpet_core::{
    Pet, PetId, PetSigner, RsaKeypair, RsaVerifyingKey, Sampler, SamplerConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RSA modulus size for fixtures. Small enough to generate quickly.
pub const FIXTURE_RSA_BITS: usize = 1024;

/// A test fixture with an RSA key pair and a seeded sampler.
pub struct TestFixture {
    pub keypair: RsaKeypair,
    pub sampler: Sampler,
    seed: u64,
}

impl TestFixture {
    /// Create a new test fixture with a random key pair.
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Create with a deterministic key pair and sampler from seed.
    pub fn with_seed(seed: u64) -> Self {
        let keypair =
            RsaKeypair::generate_with_rng(&mut StdRng::seed_from_u64(seed), FIXTURE_RSA_BITS)
                .expect("fixture key generation");
        Self {
            keypair,
            sampler: Sampler::from_seed(seed),
            seed,
        }
    }

    /// Get the key pair's public key.
    pub fn public_key(&self) -> RsaVerifyingKey {
        self.keypair.public_key()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mint a signed pet with the next sampled identifier.
    pub fn make_pet(&mut self) -> Pet {
        Pet::generate(&mut self.sampler, &self.keypair).expect("fixture pet generation")
    }

    /// Mint `count` signed pets.
    pub fn make_pets(&mut self, count: usize) -> Vec<Pet> {
        (0..count).map(|_| self.make_pet()).collect()
    }

    /// Create a signed pet with fixed fields.
    pub fn make_signed(&self, identifier: u16, created_at: DateTime<Utc>) -> Pet {
        let mut pet = Pet::new(PetId(identifier), created_at);
        pet.sign(&self.keypair).expect("fixture pet signing");
        pet
    }

    /// A minter sharing this fixture's key and seed.
    pub fn minter(&self) -> Minter<RsaKeypair> {
        let config = MinterConfig {
            sampler: SamplerConfig::seeded(self.seed),
            ..MinterConfig::default()
        };
        Minter::new(self.keypair.clone(), config).expect("default sampler parameters are valid")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count as u64).map(TestFixture::with_seed).collect()
}
