use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hexpet::{Minter, MinterConfig, PetSigner, SamplerConfig};
use serde::Serialize;
use tracing::info;

use crate::keys;
use crate::output::Output;

#[derive(Debug, Serialize)]
pub struct MintOut {
    pub count: usize,
    pub seed: u64,
    pub out: String,
}

impl fmt::Display for MintOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minted {} pets to {} (seed {})", self.count, self.out, self.seed)
    }
}

pub fn run(
    key: &Path,
    count: usize,
    seed: Option<u64>,
    out: Option<&Path>,
    verify: bool,
    output: Output,
) -> Result<()> {
    let keypair = keys::read_private_key(key)?;
    let config = MinterConfig {
        sampler: SamplerConfig {
            seed,
            ..SamplerConfig::default()
        },
        verify_after_mint: verify,
    };
    let mut minter = Minter::new(keypair, config)?;
    info!(seed = minter.seed(), count, "minting");

    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?;
            mint_to(&mut minter, count, BufWriter::new(file))?;
            output.print(&MintOut {
                count,
                seed: minter.seed(),
                out: path.display().to_string(),
            })
        }
        None => mint_to(&mut minter, count, io::stdout().lock()),
    }
}

/// Mint `count` pets and write them as JSON lines.
fn mint_to<K: PetSigner, W: Write>(minter: &mut Minter<K>, count: usize, mut sink: W) -> Result<()> {
    for _ in 0..count {
        let pet = minter.mint()?;
        info!("new pet: {}", pet.identifier);
        writeln!(sink, "{}", pet.to_json()?)?;
    }
    sink.flush()?;
    Ok(())
}
