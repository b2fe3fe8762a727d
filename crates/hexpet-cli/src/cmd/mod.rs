use anyhow::Result;

use crate::args::{Cli, Command};
use crate::output::Output;

mod keygen;
mod mint;
mod verify;

pub fn dispatch(cli: Cli) -> Result<()> {
    let output = Output::new(cli.json);
    match cli.command {
        Command::Keygen { output: path, bits } => keygen::run(&path, bits, output),
        Command::Mint {
            key,
            count,
            seed,
            out,
            no_verify,
        } => mint::run(&key, count, seed, out.as_deref(), !no_verify, output),
        Command::Verify { key, pets } => verify::run(&key, &pets, output),
    }
}
