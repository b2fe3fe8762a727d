use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use hexpet::core::RsaKeypair;
use hexpet::PetSigner;
use serde::Serialize;
use tracing::info;

use crate::keys;
use crate::output::Output;

#[derive(Debug, Serialize)]
pub struct KeygenOut {
    pub private_key: String,
    pub public_key: String,
    pub bits: usize,
    pub fingerprint: String,
}

impl fmt::Display for KeygenOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "private key: {}", self.private_key)?;
        writeln!(f, "public key:  {}", self.public_key)?;
        write!(f, "RSA-{} {}", self.bits, self.fingerprint)
    }
}

pub fn run(path: &Path, bits: usize, output: Output) -> Result<()> {
    info!(bits, "generating RSA key");
    let keypair = RsaKeypair::generate(bits).context("could not generate key")?;
    let public_path = keys::write_keypair(path, &keypair)?;

    output.print(&KeygenOut {
        private_key: path.display().to_string(),
        public_key: public_path.display().to_string(),
        bits: keypair.bits(),
        fingerprint: keypair.public_key().fingerprint().to_hex(),
    })
}
