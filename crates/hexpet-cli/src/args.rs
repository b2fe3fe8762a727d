use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hexpet::core::DEFAULT_RSA_BITS;

#[derive(Parser, Debug, Clone)]
#[command(name = "hexpet", version, about = "Mint and verify signed pets")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate an RSA key pair as base64 PKCS#1 DER files.
    Keygen {
        /// Private key file; the public key is written next to it with `.pub` appended.
        #[arg(long, default_value = "mykey")]
        output: PathBuf,

        /// Modulus size in bits.
        #[arg(long, default_value_t = DEFAULT_RSA_BITS)]
        bits: usize,
    },

    /// Mint signed pets, one JSON record per line.
    Mint {
        /// Private key file written by `keygen`.
        #[arg(long)]
        key: PathBuf,

        /// Number of pets to mint.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Sampler seed. Defaults to the clock.
        #[arg(long)]
        seed: Option<u64>,

        /// Write pets here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Skip checking each pet against the public key after signing.
        #[arg(long)]
        no_verify: bool,
    },

    /// Verify a file of JSON pets against a public key.
    Verify {
        /// Public key file written by `keygen`.
        #[arg(long)]
        key: PathBuf,

        /// File with one JSON pet per line.
        pets: PathBuf,
    },
}
