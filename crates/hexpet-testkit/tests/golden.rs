//! Golden vectors for cross-implementation verification.
//!
//! Every implementation must produce identical:
//! - signing input (canonical bytes without the signature)
//! - digest (SHA-256 of the signing input)
//! - signature (deterministic under both fixed keys)
//! - full encoding with the signature attached

use hexpet_core::{canonical_bytes, decode_pet, PetSigner, VerificationError};
use hexpet_testkit::vectors::{
    all_vectors, ed25519_signed_bytes, pet_from_vector, signed_pet_from_vector,
    vector_ed25519_keypair, vector_rsa_keypair, vector_rsa_public_key,
};

#[test]
fn test_ed25519_signatures_match() {
    let keypair = vector_ed25519_keypair();

    for vector in all_vectors() {
        let mut pet = pet_from_vector(&vector);
        pet.sign(&keypair).unwrap();

        let signature = pet.signature.as_ref().unwrap();
        assert_eq!(
            signature.to_hex(),
            vector.expected_ed25519_signature,
            "{}",
            vector.name
        );
        assert_eq!(
            hex::encode(canonical_bytes(&pet).unwrap()),
            vector.expected_ed25519_signed,
            "{}",
            vector.name
        );
    }
}

#[test]
fn test_rsa_signatures_match() {
    let keypair = vector_rsa_keypair();

    for vector in all_vectors() {
        let mut pet = pet_from_vector(&vector);
        pet.sign(&keypair).unwrap();

        assert_eq!(
            pet.signature.as_ref().unwrap().to_hex(),
            vector.expected_rsa_signature,
            "{}",
            vector.name
        );
    }
}

#[test]
fn test_published_signatures_verify() {
    let rsa_key = vector_rsa_public_key();
    let ed25519_key = vector_ed25519_keypair().public_key();

    for vector in all_vectors() {
        let pet = signed_pet_from_vector(&vector, vector.expected_rsa_signature);
        pet.verify(&rsa_key).unwrap();
        assert!(matches!(
            pet.verify(&ed25519_key),
            Err(VerificationError::SignatureMismatch)
        ));

        let pet = signed_pet_from_vector(&vector, vector.expected_ed25519_signature);
        pet.verify(&ed25519_key).unwrap();
        assert!(matches!(
            pet.verify(&rsa_key),
            Err(VerificationError::SignatureMismatch)
        ));
    }
}

#[test]
fn test_signed_encodings_decode() {
    let key = vector_ed25519_keypair().public_key();

    for vector in all_vectors() {
        let bytes = ed25519_signed_bytes(&vector);
        let pet = decode_pet(&bytes).unwrap();

        assert_eq!(pet.identifier.get(), vector.identifier);
        assert_eq!(pet.created_at, vector.created_at());
        pet.verify(&key).unwrap();
    }
}
