//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 nanoseconds since the Unix epoch)
//!
//! A pet encodes as a map with text keys `identifier`, `createdAt` and,
//! only when present, `signature`. The signing input is the same map with the
//! `signature` key left out entirely.
//!
//! **This encoding is frozen.** Changing it invalidates every issued signature.

use chrono::{DateTime, Utc};
use ciborium::value::{Integer, Value};

use crate::crypto::PetSignature;
use crate::error::PetError;
use crate::pet::Pet;
use crate::types::PetId;

/// Map key names.
mod keys {
    pub const IDENTIFIER: &str = "identifier";
    pub const CREATED_AT: &str = "createdAt";
    pub const SIGNATURE: &str = "signature";
}

const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Encode a pet without its signature. This is the signing input.
pub fn canonical_unsigned_bytes(pet: &Pet) -> Result<Vec<u8>, PetError> {
    let value = pet_to_cbor_value(pet, false)?;
    encode_cbor_value_canonical(&value)
}

/// Encode a pet including its signature, when present.
pub fn canonical_bytes(pet: &Pet) -> Result<Vec<u8>, PetError> {
    let value = pet_to_cbor_value(pet, true)?;
    encode_cbor_value_canonical(&value)
}

/// Convert a pet to a CBOR map.
fn pet_to_cbor_value(pet: &Pet, with_signature: bool) -> Result<Value, PetError> {
    let created_at = pet.created_at.timestamp_nanos_opt().ok_or_else(|| {
        PetError::Serialization(format!(
            "createdAt {} is outside the representable nanosecond range",
            pet.created_at
        ))
    })?;

    let mut entries = Vec::with_capacity(3);

    entries.push((
        Value::Text(keys::IDENTIFIER.to_string()),
        Value::Integer(pet.identifier.get().into()),
    ));

    entries.push((
        Value::Text(keys::CREATED_AT.to_string()),
        Value::Integer(created_at.into()),
    ));

    // Absent signatures are omitted, never written as null.
    if with_signature {
        if let Some(signature) = &pet.signature {
            entries.push((
                Value::Text(keys::SIGNATURE.to_string()),
                Value::Bytes(signature.as_bytes().to_vec()),
            ));
        }
    }

    Ok(Value::Map(entries))
}

/// Encode a CBOR Value to canonical bytes.
fn encode_cbor_value_canonical(value: &Value) -> Result<Vec<u8>, PetError> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), PetError> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Float(_) => {
            return Err(PetError::Serialization(
                "floats not supported in canonical encoding".into(),
            ))
        }
        _ => {
            return Err(PetError::Serialization(
                "unsupported CBOR value type".into(),
            ))
        }
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n = i128::from(i);

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), PetError> {
    let mut key_value_pairs = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        key_value_pairs.push((key_buf, v));
    }

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

/// Decode a pet from canonical bytes.
///
/// Input that parses but is not byte-for-byte canonical (different key
/// order, oversized integers, trailing bytes) is rejected.
pub fn decode_pet(bytes: &[u8]) -> Result<Pet, PetError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| PetError::Decoding(e.to_string()))?;

    let pet = cbor_value_to_pet(&value)?;

    let reencoded = canonical_bytes(&pet).map_err(|e| PetError::Decoding(e.to_string()))?;
    if reencoded != bytes {
        return Err(PetError::Decoding("input is not canonically encoded".into()));
    }

    Ok(pet)
}

/// Convert a CBOR Value (map) back to a Pet.
fn cbor_value_to_pet(value: &Value) -> Result<Pet, PetError> {
    let map = match value {
        Value::Map(m) => m,
        _ => return Err(PetError::Decoding("expected map".into())),
    };

    let mut identifier = None;
    let mut created_at = None;
    let mut signature = None;

    for (key, value) in map {
        let key = match key {
            Value::Text(k) => k.as_str(),
            _ => return Err(PetError::Decoding("map keys must be text".into())),
        };

        let duplicate = match key {
            keys::IDENTIFIER => identifier.replace(parse_identifier(value)?).is_some(),
            keys::CREATED_AT => created_at.replace(parse_created_at(value)?).is_some(),
            keys::SIGNATURE => match value {
                Value::Bytes(b) => signature
                    .replace(PetSignature::from(b.as_slice()))
                    .is_some(),
                _ => return Err(PetError::Decoding("signature must be bytes".into())),
            },
            other => return Err(PetError::Decoding(format!("unknown field: {other}"))),
        };

        if duplicate {
            return Err(PetError::Decoding(format!("duplicate field: {key}")));
        }
    }

    Ok(Pet {
        identifier: identifier.ok_or_else(|| PetError::Decoding("missing identifier".into()))?,
        created_at: created_at.ok_or_else(|| PetError::Decoding("missing createdAt".into()))?,
        signature,
    })
}

fn parse_identifier(value: &Value) -> Result<PetId, PetError> {
    match value {
        Value::Integer(i) => u16::try_from(i128::from(*i))
            .map(PetId)
            .map_err(|_| PetError::Decoding("identifier out of range".into())),
        _ => Err(PetError::Decoding("identifier must be an integer".into())),
    }
}

fn parse_created_at(value: &Value) -> Result<DateTime<Utc>, PetError> {
    let nanos = match value {
        Value::Integer(i) => i64::try_from(i128::from(*i))
            .map_err(|_| PetError::Decoding("createdAt out of range".into()))?,
        _ => return Err(PetError::Decoding("createdAt must be an integer".into())),
    };

    let secs = nanos.div_euclid(NANOS_PER_SEC);
    let subsec = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    DateTime::from_timestamp(secs, subsec)
        .ok_or_else(|| PetError::Decoding("createdAt out of range".into()))
}
