//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding, the signing digest and the
//! signatures under fixed keys. Any change to the encoding shows up here
//! before it invalidates a deployed signature.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use hexpet_core::{
    canonical_bytes, canonical_unsigned_bytes, Ed25519Keypair, Pet, PetId, PetSignature,
    RsaKeypair, RsaVerifyingKey,
};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Seed of the Ed25519 key used by the vectors.
pub const ED25519_SEED: [u8; 32] = [0x42; 32];

/// Public half of [`ED25519_SEED`], hex.
pub const ED25519_PUBLIC_KEY: &str =
    "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12";

/// 1024-bit RSA private key used by the vectors, in key-file form
/// (base64 of PKCS#1 DER). Test material only.
pub const RSA_PRIVATE_KEY: &str = "MIICXQIBAAKBgQDIF+jbWxeblZFbK+PUBE6qW02f9yu5yvGN/pCFs2gZ3C5XFBgEG7vCo505XItv63YMvhfGEfn5COk7HZG23YeLcLx0xdJSzFfwAhNgt1ARNnnfh8f4nNg9udr7/GbCkVw0n6kyt3YXsmYmWDHO4BXWxWuXVN+uF29mFSXr4P1X/QIDAQABAoGAZT3zzEmjAE4FZiQm+rfTNc9Mz4u4zCErZ7VOWtgT7EHEELtSC4Ic1rcCbmutAcwZxwjH7qhZ2u/vUsH7YJNmaPjLxpPG1a60IRNY7F1SPSlQ3ynkHJVbFRCGOlY9rigpMRH37dTOQaXycYUzzUN54O4qIosjx4KvIUmKzjIruuECQQD/Ie2ltK1erN0BCPrwajZNIMF/ErgTRkL0b+/E0TiNKmQZ/2xdcpBQdSslerbAgup7aOpDzDSZPjQ5YIoowNUbAkEAyMYTBJcef8/itfxBqQQpIq16t1fhiZKj6DndHuEpn7bWrIDUJknDYclF3r2fM1gXpSVxLe51jVWKmqSme7IQxwJBAJxIWzujJoQVHbfxmU3Fsgei5gSCIfHkm0UCgHwusRZ//huSw/2mHNK8QzbNKb9ZMmtwQ/hN0XaBjRoMkfUO0jsCQQDAvocbbQh2o1h+ZUGTxM7I38pjoRaAQCrikkpZjseq8Jh+2t7QMxhDFDrjbx8a54MrpBpXggmQOYLqmw7IyVWZAkBS5zWGX0KF6Yp6q5YMGD1jt+tM6b8KUTci90BEW9RrfOOdacwN6p3AtSdr3F5v+L31N3Tl9qtIQokONIGtRIYl";

/// Public half of [`RSA_PRIVATE_KEY`], in key-file form.
pub const RSA_PUBLIC_KEY: &str = "MIGJAoGBAMgX6NtbF5uVkVsr49QETqpbTZ/3K7nK8Y3+kIWzaBncLlcUGAQbu8KjnTlci2/rdgy+F8YR+fkI6Tsdkbbdh4twvHTF0lLMV/ACE2C3UBE2ed+Hx/ic2D252vv8ZsKRXDSfqTK3dheyZiZYMc7gFdbFa5dU364Xb2YVJevg/Vf9AgMBAAE=";

/// SHA-256 of the big-endian modulus of [`RSA_PUBLIC_KEY`].
pub const RSA_FINGERPRINT: &str =
    "c319de0f74d13e6de6552e7eb652a0531982c64e27234b642bcbf9756870bb87";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Pet identifier.
    pub identifier: u16,
    /// Creation time, nanoseconds since the Unix epoch.
    pub created_at_nanos: i64,
    /// Expected signing input (hex).
    pub expected_unsigned: &'static str,
    /// Expected SHA-256 of the signing input (hex).
    pub expected_hash: &'static str,
    /// Expected Ed25519 signature under [`ED25519_SEED`] (hex).
    pub expected_ed25519_signature: &'static str,
    /// Expected full encoding carrying the Ed25519 signature (hex).
    pub expected_ed25519_signed: &'static str,
    /// Expected RSA PKCS#1 v1.5 signature under [`RSA_PRIVATE_KEY`] (hex).
    pub expected_rsa_signature: &'static str,
}

impl GoldenVector {
    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_nanos(self.created_at_nanos)
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "identifier 42 at 2023-11-14T22:13:20Z",
            identifier: 42,
            created_at_nanos: 1_700_000_000_000_000_000,
            expected_unsigned: "a2696372656174656441741b17979cfe362a00006a6964656e746966696572182a",
            expected_hash: "ee38fdc0222ef47b1a0f42db8439fe3dbdab2040ed6009208f81e7ea00587327",
            expected_ed25519_signature: "21e99d6016725cd6d6120623991f3df3f8cfcdadbc6b79ee367b871b2de0d32023bcea575ad2c8d6405ef1d259c70bd9bd6214855dfdf3400a400fef1d21a30e",
            expected_ed25519_signed: "a3696372656174656441741b17979cfe362a0000697369676e6174757265584021e99d6016725cd6d6120623991f3df3f8cfcdadbc6b79ee367b871b2de0d32023bcea575ad2c8d6405ef1d259c70bd9bd6214855dfdf3400a400fef1d21a30e6a6964656e746966696572182a",
            expected_rsa_signature: "5b0bb44cf06b882826a185b51bfc51c59cae1362be27794ab9e46c3fad26fd491ef435ce840acb983c58f75233ccef1f3a56e95eeded03b9ae860e65b8f114c79108cb66b5e752d527eff0da7de75e884d190d3b216d1416cdaf469f26fc6e438f45c81eeaa86278ef89b85edfdfde55246d7ffc79d20752ff71297e1b10f788",
        },
        GoldenVector {
            name: "identifier 0 at the epoch",
            identifier: 0,
            created_at_nanos: 0,
            expected_unsigned: "a269637265617465644174006a6964656e74696669657200",
            expected_hash: "98f719a6768c41f8cba61fc4e6cb3be73d7d03cf7e182ec3114f170e19183b24",
            expected_ed25519_signature: "ae3f43edc97ba2c9fb173beded1b89fbda52575ef5f9c36491538362bc619cfb0b7f2faef10631b9c6550465ec1cec8279d05c9e0cc68f7c1404cabac43ee20b",
            expected_ed25519_signed: "a36963726561746564417400697369676e61747572655840ae3f43edc97ba2c9fb173beded1b89fbda52575ef5f9c36491538362bc619cfb0b7f2faef10631b9c6550465ec1cec8279d05c9e0cc68f7c1404cabac43ee20b6a6964656e74696669657200",
            expected_rsa_signature: "4f641aafeb57fd6c31ba25dabf44aaeacb5b94930565552fa15eaf06330f5801dc150379ca8955334f4180f81d93a4ec9dfbffdebeee1858b7a510e98cee069949f98b5a8764fc75adecc329cb9a48f8cbee5083b44647a4eca4cabdc205357e12c16acef8c00ba77bb35132dcc2363ce2f2d2cb9e2fb369161a10f540744206",
        },
        GoldenVector {
            name: "identifier 0xFFFF with sub-second time",
            identifier: 0xffff,
            created_at_nanos: 1_736_870_400_123_456_789,
            expected_unsigned: "a2696372656174656441741b181a9a6d343fcd156a6964656e74696669657219ffff",
            expected_hash: "c14fd9e5cfd4da004054f6fec15dd02c69bbf0a74242612906bd214da399672d",
            expected_ed25519_signature: "701f77557737e38e029f09747b69d49db1541afe46663fda22bc2e58165059aa74de944abe3d19d07f43eee22784e897428c63dd7ebe18a2fa22806ae0027f00",
            expected_ed25519_signed: "a3696372656174656441741b181a9a6d343fcd15697369676e61747572655840701f77557737e38e029f09747b69d49db1541afe46663fda22bc2e58165059aa74de944abe3d19d07f43eee22784e897428c63dd7ebe18a2fa22806ae0027f006a6964656e74696669657219ffff",
            expected_rsa_signature: "99242002bd6e8bad42a5372bf9f567b78decaccb4fea055c60189b272fc042a579c78f1a20a58dfc5626ea5ee124c437dcdf4e1ab92b2ae66e1978f004183d3ce1046b58c1ea3e1dd091468e505eb29b6685e3269981d75a57680fd2f453ea8fb4313b7190d0bdb63823ca3518e8ebb4832816529222fb5fce56dfce277dee11",
        },
        GoldenVector {
            name: "identifier 7 just before the epoch",
            identifier: 7,
            created_at_nanos: -1_000_000_001,
            expected_unsigned: "a2696372656174656441743a3b9aca006a6964656e74696669657207",
            expected_hash: "7862cac03d87bcd1984270d597dddd8c50411c366e91f115b267035e27b9b36d",
            expected_ed25519_signature: "d71d7d6020c22f604ea1e091747f1d84c48ce018438e8aa72366eabfd266a9a26484fbec0737fb0e34be22892d1d491d54cbbea530b60e12d0397f793f56f000",
            expected_ed25519_signed: "a3696372656174656441743a3b9aca00697369676e61747572655840d71d7d6020c22f604ea1e091747f1d84c48ce018438e8aa72366eabfd266a9a26484fbec0737fb0e34be22892d1d491d54cbbea530b60e12d0397f793f56f0006a6964656e74696669657207",
            expected_rsa_signature: "956f6bfe8af90f0366ea2279a40f3bf87c89ba32bd4152a3ef51bf8d16ca646c40b379872930938e80ee38049cb50b1be4d6fdb087861bf0121cf636640dc9ea8fd3bde57c2e88e39626763a47f86d04c86839c3c332c43237deff30d0d7421fb015b4f4c90ca64d164d8ab43af86269a8109f900cf848eef4fdfdbe0d9a0b94",
        },
    ]
}

/// Build the unsigned pet a vector describes.
pub fn pet_from_vector(vector: &GoldenVector) -> Pet {
    Pet::new(PetId(vector.identifier), vector.created_at())
}

/// The Ed25519 key the vectors are signed with.
pub fn vector_ed25519_keypair() -> Ed25519Keypair {
    Ed25519Keypair::from_seed(&ED25519_SEED)
}

/// The RSA key the vectors are signed with.
pub fn vector_rsa_keypair() -> RsaKeypair {
    let der = STANDARD
        .decode(RSA_PRIVATE_KEY)
        .expect("RSA_PRIVATE_KEY is valid base64");
    let private_key =
        RsaPrivateKey::from_pkcs1_der(&der).expect("RSA_PRIVATE_KEY is a PKCS#1 private key");
    RsaKeypair::from_private_key(private_key)
}

/// Public half of [`vector_rsa_keypair`], decoded from [`RSA_PUBLIC_KEY`].
pub fn vector_rsa_public_key() -> RsaVerifyingKey {
    let der = STANDARD
        .decode(RSA_PUBLIC_KEY)
        .expect("RSA_PUBLIC_KEY is valid base64");
    let public_key =
        RsaPublicKey::from_pkcs1_der(&der).expect("RSA_PUBLIC_KEY is a PKCS#1 public key");
    RsaVerifyingKey::from(public_key)
}

/// Check every vector's signing input and digest.
///
/// Returns `(name, matches, actual_hash_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let pet = pet_from_vector(v);
            let unsigned = canonical_unsigned_bytes(&pet).map(hex::encode);
            let hash = pet.canonical_hash().map(|d| d.to_hex());

            match (unsigned, hash) {
                (Ok(unsigned), Ok(hash)) => {
                    let matches = unsigned == v.expected_unsigned && hash == v.expected_hash;
                    (v.name.to_string(), matches, hash)
                }
                (Err(e), _) | (_, Err(e)) => (v.name.to_string(), false, e.to_string()),
            }
        })
        .collect()
}

/// Attach a hex-encoded expected signature to a vector's pet.
pub fn signed_pet_from_vector(vector: &GoldenVector, signature_hex: &str) -> Pet {
    let mut pet = pet_from_vector(vector);
    let bytes = hex::decode(signature_hex).expect("vector signature is valid hex");
    pet.signature = Some(PetSignature::from(bytes));
    pet
}

/// Full encoding of a vector's pet with its Ed25519 signature attached.
pub fn ed25519_signed_bytes(vector: &GoldenVector) -> Vec<u8> {
    let pet = signed_pet_from_vector(vector, vector.expected_ed25519_signature);
    canonical_bytes(&pet).expect("vector timestamps are in range")
}
