//! Strong type definitions for hexpet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-bit pet identifier.
///
/// Opaque "species" code. Low values are common, high values rare, as drawn
/// by the [`Sampler`](crate::Sampler).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub u16);

impl PetId {
    pub const MIN: Self = Self(u16::MIN);
    pub const MAX: Self = Self(u16::MAX);

    /// Create from the raw value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PetId({self})")
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl From<u16> for PetId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<PetId> for u16 {
    fn from(id: PetId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_id_display() {
        assert_eq!(PetId(0x2a).to_string(), "0x002A");
        assert_eq!(PetId::MAX.to_string(), "0xFFFF");
        assert_eq!(PetId::MIN.to_string(), "0x0000");
    }

    #[test]
    fn test_pet_id_debug() {
        let debug = format!("{:?}", PetId(0xbeef));
        assert_eq!(debug, "PetId(0xBEEF)");
    }

    #[test]
    fn test_pet_id_serializes_as_integer() {
        let json = serde_json::to_string(&PetId(513)).unwrap();
        assert_eq!(json, "513");

        let back: PetId = serde_json::from_str("513").unwrap();
        assert_eq!(back, PetId(513));
    }
}
