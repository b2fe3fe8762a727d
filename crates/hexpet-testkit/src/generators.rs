//! Proptest generators for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use hexpet_core::{Ed25519Keypair, Pet, PetId, PetSignature, SamplerConfig};

/// Generate a random Ed25519 key pair.
///
/// Property tests sign with Ed25519; RSA key generation is too slow to run
/// per case.
pub fn keypair() -> impl Strategy<Value = Ed25519Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Ed25519Keypair::from_seed(&seed))
}

/// Generate any identifier.
pub fn pet_id() -> impl Strategy<Value = PetId> {
    any::<u16>().prop_map(PetId)
}

/// Generate a creation time. Every i64 nanosecond count is encodable.
pub fn created_at() -> impl Strategy<Value = DateTime<Utc>> {
    any::<i64>().prop_map(|nanos| Utc.timestamp_nanos(nanos))
}

/// Generate signature bytes of at most `max_len` bytes.
pub fn signature(max_len: usize) -> impl Strategy<Value = PetSignature> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(PetSignature::from)
}

/// Generate a valid sampler configuration.
pub fn sampler_config() -> impl Strategy<Value = SamplerConfig> {
    (1.01f64..4.0, 1.0f64..64.0, any::<u16>(), any::<u64>()).prop_map(
        |(exponent, offset, max, seed)| SamplerConfig {
            exponent,
            offset,
            max,
            seed: Some(seed),
        },
    )
}

/// Parameters for generating a pet.
#[derive(Debug, Clone)]
pub struct PetParams {
    pub keypair: Ed25519Keypair,
    pub identifier: PetId,
    pub created_at: DateTime<Utc>,
}

impl Arbitrary for PetParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), pet_id(), created_at())
            .prop_map(|(keypair, identifier, created_at)| PetParams {
                keypair,
                identifier,
                created_at,
            })
            .boxed()
    }
}

/// Generate a signed pet from parameters.
pub fn pet_from_params(params: &PetParams) -> Pet {
    let mut pet = Pet::new(params.identifier, params.created_at);
    pet.sign(&params.keypair).expect("generated timestamps are in range");
    pet
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpet_core::{decode_pet, PetSigner, Sampler};

    proptest! {
        #[test]
        fn test_canonical_hash_deterministic(params: PetParams) {
            let p1 = pet_from_params(&params);
            let p2 = pet_from_params(&params);

            prop_assert_eq!(p1.canonical_hash().unwrap(), p2.canonical_hash().unwrap());
            prop_assert_eq!(p1.signature, p2.signature);
        }

        #[test]
        fn test_signed_pet_verifies(params: PetParams) {
            let pet = pet_from_params(&params);
            prop_assert!(pet.verify(&params.keypair.public_key()).is_ok());
        }

        #[test]
        fn test_hash_ignores_signature(params: PetParams, sig in signature(300)) {
            let mut pet = pet_from_params(&params);
            let hash = pet.canonical_hash().unwrap();

            pet.signature = Some(sig);
            prop_assert_eq!(pet.canonical_hash().unwrap(), hash);
            pet.signature = None;
            prop_assert_eq!(pet.canonical_hash().unwrap(), hash);
        }

        #[test]
        fn test_binary_form_decodes(params: PetParams) {
            let pet = pet_from_params(&params);
            let decoded = decode_pet(&pet.to_bytes().unwrap()).unwrap();
            prop_assert_eq!(decoded, pet);
        }

        #[test]
        fn test_json_form_decodes(params: PetParams) {
            let pet = pet_from_params(&params);
            let decoded = Pet::from_json(&pet.to_json().unwrap()).unwrap();
            prop_assert_eq!(decoded, pet);
        }

        #[test]
        fn test_other_identifier_fails(params: PetParams, other in pet_id()) {
            prop_assume!(other != params.identifier);

            let mut pet = pet_from_params(&params);
            pet.identifier = other;
            prop_assert!(pet.verify(&params.keypair.public_key()).is_err());
        }

        #[test]
        fn test_flipped_signature_bit_fails(params: PetParams, index in 0usize..64, bit in 0u8..8) {
            let mut pet = pet_from_params(&params);
            let mut bytes = pet.signature.as_ref().unwrap().as_bytes().to_vec();
            bytes[index] ^= 1 << bit;
            pet.signature = Some(PetSignature::from(bytes));

            prop_assert!(pet.verify(&params.keypair.public_key()).is_err());
        }

        #[test]
        fn test_other_key_fails(params: PetParams, other in keypair()) {
            prop_assume!(other.public_key() != params.keypair.public_key());

            let pet = pet_from_params(&params);
            let err = pet.verify(&other.public_key()).unwrap_err();
            prop_assert!(err.is_inauthentic());
        }

        #[test]
        fn test_sampler_stays_in_range(config in sampler_config()) {
            let max = config.max;
            let mut sampler = Sampler::new(config).unwrap();
            for _ in 0..256 {
                prop_assert!(sampler.next_id().get() <= max);
            }
        }
    }
}
