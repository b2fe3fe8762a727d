//! Cryptographic primitives: SHA-256 digests and the signature schemes a
//! deployment can pick from.
//!
//! The reference scheme is RSASSA-PKCS1-v1_5 over SHA-256 with a 2048-bit
//! modulus ([`RsaKeypair`]). Ed25519 over the same digest is available as
//! [`Ed25519Keypair`]. Signer and verifier must agree on the scheme; nothing
//! on the wire says which one was used.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{CryptoRng, RngCore};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{PetError, VerificationError};

/// Default RSA modulus size in bits.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest(pub [u8; 32]);

impl Sha256Digest {
    /// Compute the SHA-256 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Signature bytes attached to a pet.
///
/// Length depends on the scheme (256 bytes for RSA-2048, 64 for Ed25519).
/// The JSON form is padded standard base64.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PetSignature(pub Bytes);

impl PetSignature {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(encoded).map(Self::from)
    }
}

impl fmt::Debug for PetSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "PetSig({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for PetSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PetSignature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for PetSignature {
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl Serialize for PetSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PetSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

/// The private half of a key pair: signs canonical digests.
pub trait PetSigner {
    /// The matching verification key.
    type PublicKey: PetVerifier;

    fn public_key(&self) -> Self::PublicKey;

    /// Sign a canonical digest.
    fn sign_digest(&self, digest: &Sha256Digest) -> Result<PetSignature, PetError>;
}

/// The public half of a key pair: checks signatures over canonical digests.
pub trait PetVerifier {
    /// Returns `Ok(())` only if `signature` is valid for exactly `digest`
    /// under this key.
    fn verify_digest(
        &self,
        digest: &Sha256Digest,
        signature: &PetSignature,
    ) -> Result<(), VerificationError>;
}

/// An RSA private key signing with PKCS#1 v1.5 over SHA-256.
#[derive(Clone)]
pub struct RsaKeypair {
    private_key: RsaPrivateKey,
}

impl RsaKeypair {
    /// Generate a new key from the thread RNG.
    pub fn generate(bits: usize) -> Result<Self, PetError> {
        Self::generate_with_rng(&mut rand::thread_rng(), bits)
    }

    /// Generate a new key from the given RNG.
    ///
    /// A seeded RNG gives a reproducible key, which is only useful in tests.
    pub fn generate_with_rng<R: CryptoRng + RngCore>(
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, PetError> {
        let private_key =
            RsaPrivateKey::new(rng, bits).map_err(|e| PetError::InvalidKey(e.to_string()))?;
        Ok(Self { private_key })
    }

    /// Wrap an existing private key.
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    /// Get the underlying private key.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.private_key.size() * 8
    }
}

impl PetSigner for RsaKeypair {
    type PublicKey = RsaVerifyingKey;

    fn public_key(&self) -> RsaVerifyingKey {
        RsaVerifyingKey(self.private_key.to_public_key())
    }

    fn sign_digest(&self, digest: &Sha256Digest) -> Result<PetSignature, PetError> {
        // The RNG only drives blinding; PKCS#1 v1.5 output is deterministic.
        let signature = self
            .private_key
            .sign_with_rng(
                &mut rand::thread_rng(),
                Pkcs1v15Sign::new::<Sha256>(),
                digest.as_bytes(),
            )
            .map_err(|e| PetError::Signing(e.to_string()))?;
        Ok(PetSignature::from(signature))
    }
}

impl fmt::Debug for RsaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaKeypair({:?})", self.public_key())
    }
}

/// An RSA public key verifying PKCS#1 v1.5 signatures over SHA-256.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaVerifyingKey(pub RsaPublicKey);

impl RsaVerifyingKey {
    /// Get the underlying public key.
    pub fn as_inner(&self) -> &RsaPublicKey {
        &self.0
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    /// SHA-256 of the big-endian modulus. Identifies the key in logs.
    pub fn fingerprint(&self) -> Sha256Digest {
        Sha256Digest::hash(&self.0.n().to_bytes_be())
    }
}

impl PetVerifier for RsaVerifyingKey {
    fn verify_digest(
        &self,
        digest: &Sha256Digest,
        signature: &PetSignature,
    ) -> Result<(), VerificationError> {
        self.0
            .verify(
                Pkcs1v15Sign::new::<Sha256>(),
                digest.as_bytes(),
                signature.as_bytes(),
            )
            .map_err(|_| VerificationError::SignatureMismatch)
    }
}

impl From<RsaPublicKey> for RsaVerifyingKey {
    fn from(key: RsaPublicKey) -> Self {
        Self(key)
    }
}

impl fmt::Debug for RsaVerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RsaPub({}, {})", self.bits(), &self.fingerprint().to_hex()[..16])
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; 32]);

impl Ed25519PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl PetVerifier for Ed25519PublicKey {
    fn verify_digest(
        &self,
        digest: &Sha256Digest,
        signature: &PetSignature,
    ) -> Result<(), VerificationError> {
        let verifying_key = VerifyingKey::from_bytes(&self.0)
            .map_err(|e| PetError::InvalidKey(e.to_string()))?;

        let sig = Signature::from_slice(signature.as_bytes())
            .map_err(|_| VerificationError::SignatureMismatch)?;

        verifying_key
            .verify(digest.as_bytes(), &sig)
            .map_err(|_| VerificationError::SignatureMismatch)
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Pub({})", &self.to_hex()[..16])
    }
}

impl From<[u8; 32]> for Ed25519PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// An Ed25519 key pair signing canonical digests.
#[derive(Clone)]
pub struct Ed25519Keypair {
    signing_key: SigningKey,
}

impl Ed25519Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Get the raw seed bytes (secret key material).
    pub fn seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl PetSigner for Ed25519Keypair {
    type PublicKey = Ed25519PublicKey;

    fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    fn sign_digest(&self, digest: &Sha256Digest) -> Result<PetSignature, PetError> {
        let sig = self.signing_key.sign(digest.as_bytes());
        Ok(PetSignature::from(sig.to_bytes().as_slice()))
    }
}

impl fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Keypair({:?})", self.public_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rsa_keypair(seed: u64) -> RsaKeypair {
        RsaKeypair::generate_with_rng(&mut StdRng::seed_from_u64(seed), 1024).unwrap()
    }

    #[test]
    fn test_sha256_known_value() {
        let digest = Sha256Digest::hash(b"abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_rsa_sign_verify() {
        let keypair = test_rsa_keypair(1);
        let digest = Sha256Digest::hash(b"hello world");
        let signature = keypair.sign_digest(&digest).unwrap();

        assert_eq!(signature.len(), 128);
        keypair
            .public_key()
            .verify_digest(&digest, &signature)
            .expect("valid signature should verify");

        let tampered = Sha256Digest::hash(b"hello worlD");
        let result = keypair.public_key().verify_digest(&tampered, &signature);
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_rsa_signature_deterministic() {
        let keypair = test_rsa_keypair(2);
        let digest = Sha256Digest::hash(b"same input");

        let s1 = keypair.sign_digest(&digest).unwrap();
        let s2 = keypair.sign_digest(&digest).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_rsa_wrong_key_rejected() {
        let k1 = test_rsa_keypair(3);
        let k2 = test_rsa_keypair(4);
        let digest = Sha256Digest::hash(b"payload");

        let signature = k1.sign_digest(&digest).unwrap();
        let result = k2.public_key().verify_digest(&digest, &signature);
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_rsa_key_size() {
        let keypair = test_rsa_keypair(5);
        assert_eq!(keypair.bits(), 1024);
        assert_eq!(keypair.public_key().bits(), 1024);
    }

    #[test]
    fn test_ed25519_sign_verify() {
        let keypair = Ed25519Keypair::generate();
        let digest = Sha256Digest::hash(b"hello world");
        let signature = keypair.sign_digest(&digest).unwrap();

        assert_eq!(signature.len(), 64);
        keypair
            .public_key()
            .verify_digest(&digest, &signature)
            .expect("valid signature should verify");
    }

    #[test]
    fn test_ed25519_truncated_signature_rejected() {
        let keypair = Ed25519Keypair::from_seed(&[0x42; 32]);
        let digest = Sha256Digest::hash(b"hello");
        let signature = keypair.sign_digest(&digest).unwrap();

        let truncated = PetSignature::from(&signature.as_bytes()[..32]);
        let result = keypair.public_key().verify_digest(&digest, &truncated);
        assert!(matches!(result, Err(VerificationError::SignatureMismatch)));
    }

    #[test]
    fn test_ed25519_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Ed25519Keypair::from_seed(&seed);
        let kp2 = Ed25519Keypair::from_seed(&seed);
        assert_eq!(kp1.public_key(), kp2.public_key());
        assert_eq!(kp1.seed(), seed);
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = Ed25519Keypair::generate().public_key();
        let recovered = Ed25519PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, recovered);
    }

    #[test]
    fn test_signature_base64() {
        let sig = PetSignature::from(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(sig.to_base64(), "3q2+7w==");
        assert_eq!(PetSignature::from_base64("3q2+7w==").unwrap(), sig);
        assert!(PetSignature::from_base64("not base64!").is_err());
    }

    #[test]
    fn test_signature_debug_short() {
        let sig = PetSignature::from(vec![0xab]);
        assert_eq!(format!("{:?}", sig), "PetSig(ab...)");
    }
}
