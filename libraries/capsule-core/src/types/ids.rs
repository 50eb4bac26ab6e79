/// ID types for Capsule entities
use crate::error::{CapsuleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random user ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Memory identifier
///
/// Always a UUID; anything else is rejected at parse time so that a
/// malformed id can never reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryId(Uuid);

impl MemoryId {
    /// Generate a new random memory ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a hyphenated UUID string
    ///
    /// Only the canonical `8-4-4-4-12` form is accepted; the simple, braced
    /// and `urn:uuid:` spellings are rejected.
    pub fn parse(id: &str) -> Result<Self> {
        if !is_hyphenated(id) {
            return Err(CapsuleError::invalid_input(format!(
                "Invalid uuid: {:?} is not in 8-4-4-4-12 form",
                id
            )));
        }

        Uuid::try_parse(id)
            .map(Self)
            .map_err(|e| CapsuleError::invalid_input(format!("Invalid uuid: {}", e)))
    }
}

fn is_hyphenated(id: &str) -> bool {
    id.len() == 36
        && id
            .bytes()
            .enumerate()
            .all(|(i, b)| matches!(i, 8 | 13 | 18 | 23) == (b == b'-'))
}

impl FromStr for MemoryId {
    type Err = CapsuleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_id_accepts_hyphenated_uuid() {
        let id = MemoryId::parse("1b8dcd35-97d2-4d52-8c9b-684bf26a005b").unwrap();
        assert_eq!(id.to_string(), "1b8dcd35-97d2-4d52-8c9b-684bf26a005b");
    }

    #[test]
    fn memory_id_rejects_garbage() {
        assert!(MemoryId::parse("not-a-uuid").is_err());
        assert!(MemoryId::parse("").is_err());
        assert!(MemoryId::parse("1b8dcd35-97d2-4d52-8c9b").is_err());
    }

    #[test]
    fn memory_id_rejects_non_canonical_spellings() {
        for raw in [
            "1b8dcd3597d24d528c9b684bf26a005b",
            "{1b8dcd35-97d2-4d52-8c9b-684bf26a005b}",
            "urn:uuid:1b8dcd35-97d2-4d52-8c9b-684bf26a005b",
            "1b8dcd35-97d2-4d52-8c9b-684bf26a005",
            "1b8dcd3597-d2-4d52-8c9b-684bf26a005b",
        ] {
            assert!(MemoryId::parse(raw).is_err(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn memory_id_accepts_uppercase_hex() {
        let id = MemoryId::parse("1B8DCD35-97D2-4D52-8C9B-684BF26A005B").unwrap();
        assert_eq!(id.to_string(), "1b8dcd35-97d2-4d52-8c9b-684bf26a005b");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(MemoryId::generate(), MemoryId::generate());
        assert_ne!(UserId::generate(), UserId::generate());
    }
}
