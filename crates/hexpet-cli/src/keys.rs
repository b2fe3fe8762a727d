//! Key files: standard padded base64 of PKCS#1 DER, no PEM armor.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hexpet::core::{RsaKeypair, RsaVerifyingKey};
use hexpet::PetSigner;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// `<path>.pub`
pub fn public_key_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".pub");
    PathBuf::from(name)
}

/// Write the private key to `path` and the public key to `<path>.pub`.
/// Returns the public key path.
pub fn write_keypair(path: &Path, keypair: &RsaKeypair) -> Result<PathBuf> {
    let private_der = keypair
        .private_key()
        .to_pkcs1_der()
        .context("encoding private key")?;
    write_base64(path, private_der.as_bytes())?;

    let public_path = public_key_path(path);
    let public_der = keypair
        .public_key()
        .as_inner()
        .to_pkcs1_der()
        .context("encoding public key")?;
    write_base64(&public_path, public_der.as_bytes())?;

    Ok(public_path)
}

pub fn read_private_key(path: &Path) -> Result<RsaKeypair> {
    let der = read_base64(path)?;
    let private_key = RsaPrivateKey::from_pkcs1_der(&der)
        .with_context(|| format!("{} is not a PKCS#1 RSA private key", path.display()))?;
    Ok(RsaKeypair::from_private_key(private_key))
}

pub fn read_public_key(path: &Path) -> Result<RsaVerifyingKey> {
    let der = read_base64(path)?;
    let public_key = RsaPublicKey::from_pkcs1_der(&der)
        .with_context(|| format!("{} is not a PKCS#1 RSA public key", path.display()))?;
    Ok(RsaVerifyingKey::from(public_key))
}

fn write_base64(path: &Path, der: &[u8]) -> Result<()> {
    fs::write(path, STANDARD.encode(der))
        .with_context(|| format!("could not write key to {}", path.display()))
}

fn read_base64(path: &Path) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read key from {}", path.display()))?;
    STANDARD
        .decode(text.trim())
        .with_context(|| format!("{} is not base64", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpet::core::Sha256Digest;
    use hexpet::PetVerifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn test_keypair() -> RsaKeypair {
        RsaKeypair::generate_with_rng(&mut StdRng::seed_from_u64(1), 1024).unwrap()
    }

    #[test]
    fn test_public_key_path() {
        assert_eq!(
            public_key_path(Path::new("keys/mykey")),
            PathBuf::from("keys/mykey.pub")
        );
    }

    #[test]
    fn test_key_files_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mykey");
        let keypair = test_keypair();

        let public_path = write_keypair(&path, &keypair).unwrap();
        assert_eq!(public_path, dir.path().join("mykey.pub"));

        let loaded = read_private_key(&path).unwrap();
        let public_key = read_public_key(&public_path).unwrap();
        assert_eq!(public_key, keypair.public_key());

        let digest = Sha256Digest::hash(b"pet");
        let signature = loaded.sign_digest(&digest).unwrap();
        public_key.verify_digest(&digest, &signature).unwrap();
    }

    #[test]
    fn test_key_file_is_plain_base64() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("k");
        write_keypair(&path, &test_keypair()).unwrap();

        let text = fs::read_to_string(dir.path().join("k.pub")).unwrap();
        assert!(!text.contains("BEGIN"));
        assert!(STANDARD.decode(&text).is_ok());
    }

    #[test]
    fn test_trailing_newline_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("k");
        let public_path = write_keypair(&path, &test_keypair()).unwrap();

        let mut text = fs::read_to_string(&public_path).unwrap();
        text.push('\n');
        fs::write(&public_path, text).unwrap();
        assert!(read_public_key(&public_path).is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad");

        fs::write(&path, "not base64!").unwrap();
        assert!(read_private_key(&path).is_err());

        fs::write(&path, STANDARD.encode(b"not der")).unwrap();
        assert!(read_public_key(&path).is_err());

        assert!(read_public_key(&dir.path().join("missing")).is_err());
    }
}
