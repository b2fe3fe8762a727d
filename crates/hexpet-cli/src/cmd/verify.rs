use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use hexpet::{verify_with, Pet, PetId, PetVerifier};
use serde::Serialize;

use crate::keys;
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Inauthentic,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "ok",
            Status::Inauthentic => "inauthentic",
            Status::Error => "error",
        })
    }
}

/// Outcome for one line of the pets file.
#[derive(Debug, Serialize)]
pub struct Verdict {
    pub line: usize,
    pub identifier: Option<PetId>,
    pub verdict: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match self.identifier {
            Some(id) => write!(f, "{id} ")?,
            None => f.write_str("? ")?,
        }
        write!(f, "{}", self.verdict)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

pub fn run(key: &Path, pets: &Path, output: Output) -> Result<()> {
    let public_key = keys::read_public_key(key)?;
    let file = File::open(pets).with_context(|| format!("could not open {}", pets.display()))?;

    let verdicts = verify_lines(&public_key, BufReader::new(file))?;
    for verdict in &verdicts {
        output.print(verdict)?;
    }

    let failed = verdicts.iter().filter(|v| v.verdict != Status::Ok).count();
    if failed > 0 {
        bail!("{failed} of {} pets failed verification", verdicts.len());
    }
    Ok(())
}

/// Verify every non-blank line. Line numbers are 1-based.
fn verify_lines<V: PetVerifier, R: BufRead>(key: &V, reader: R) -> Result<Vec<Verdict>> {
    let mut verdicts = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("could not read pets file")?;
        if line.trim().is_empty() {
            continue;
        }
        verdicts.push(verify_line(key, index + 1, &line));
    }
    Ok(verdicts)
}

fn verify_line<V: PetVerifier>(key: &V, line: usize, text: &str) -> Verdict {
    let pet = match Pet::from_json(text) {
        Ok(pet) => pet,
        Err(e) => {
            return Verdict {
                line,
                identifier: None,
                verdict: Status::Error,
                detail: Some(e.to_string()),
            }
        }
    };

    let (verdict, detail) = match verify_with(key, &pet) {
        Ok(()) => (Status::Ok, None),
        Err(e) if e.is_inauthentic() => (Status::Inauthentic, Some(e.to_string())),
        Err(e) => (Status::Error, Some(e.to_string())),
    };

    Verdict {
        line,
        identifier: Some(pet.identifier),
        verdict,
        detail,
    }
}
