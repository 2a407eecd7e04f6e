//! Report identifiers in canonical short form.
//!
//! Stored reports are addressed by an 8-character identifier taken from the
//! leading hex digits of a freshly generated v4 UUID. The short form keeps
//! filenames and URLs readable while remaining unique enough for a
//! single-directory prescreening archive; the store guards against the rare
//! collision at save time.

use std::{fmt, str::FromStr};

use uuid::Uuid;

/// Error type for report identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid report id: {0}")]
    InvalidInput(String),
}

/// Canonical report identifier (8 lowercase hex characters).
///
/// Once constructed, the contained identifier is guaranteed to be in
/// canonical form, so it can be embedded in filenames and index entries
/// without further checking.
///
/// # Construction
/// - [`ReportId::generate`] allocates a fresh identifier for a new report.
/// - [`ReportId::parse`] validates an externally supplied identifier.
///
/// # Errors
/// [`ReportId::parse`] returns [`IdError::InvalidInput`] if the input is not
/// already canonical. Other representations (uppercase, longer UUID forms)
/// are rejected rather than normalised.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReportId(String);

impl ReportId {
    /// Length of the canonical form.
    pub const LEN: usize = 8;

    /// Generates a new report identifier.
    ///
    /// The identifier is the first [`ReportId::LEN`] characters of a v4 UUID
    /// in simple (hyphen-free, lowercase) form.
    pub fn generate() -> Self {
        let canonical = Uuid::new_v4().simple().to_string();
        Self(canonical[..Self::LEN].to_owned())
    }

    /// Validates and parses an identifier that must already be in canonical form.
    ///
    /// # Arguments
    ///
    /// * `input` - Identifier string to validate. Must be exactly 8 lowercase
    ///   hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> Result<Self, IdError> {
        if Self::is_canonical(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(IdError::InvalidInput(format!(
            "report id must be {} lowercase hex characters, got: '{}'",
            Self::LEN,
            input
        )))
    }

    /// Returns true if `input` is in canonical report-id form.
    ///
    /// This is a purely syntactic check: exactly 8 bytes, each a lowercase
    /// hex character (`0-9` or `a-f`).
    pub fn is_canonical(input: &str) -> bool {
        input.len() == Self::LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportId::parse(s)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ReportId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ReportId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ReportId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_canonical_id() {
        let id = ReportId::generate();
        assert_eq!(id.as_str().len(), ReportId::LEN);
        assert!(ReportId::is_canonical(id.as_str()));
    }

    #[test]
    fn test_parse_valid_canonical_id() {
        let result = ReportId::parse("550e8400");
        assert!(result.is_ok());
        assert_eq!(result.unwrap().to_string(), "550e8400");
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(ReportId::parse("550E8400").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(ReportId::parse("550e840").is_err());
        assert!(ReportId::parse("550e84000").is_err());
        assert!(ReportId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_full_uuid() {
        assert!(ReportId::parse("550e8400-e29b-41d4-a716-446655440000").is_err());
        assert!(ReportId::parse("550e8400e29b41d4a716446655440000").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        match ReportId::parse("550e84zz") {
            Err(IdError::InvalidInput(msg)) => {
                assert!(msg.contains("8 lowercase hex characters"));
            }
            Ok(_) => panic!("expected an invalid-input error"),
        }
    }

    #[test]
    fn test_is_canonical() {
        assert!(ReportId::is_canonical("00000000"));
        assert!(ReportId::is_canonical("ffffffff"));
        assert!(ReportId::is_canonical("a1b2c3d4"));
        assert!(!ReportId::is_canonical("A1B2C3D4"));
        assert!(!ReportId::is_canonical("a1b2c3d"));
        assert!(!ReportId::is_canonical(""));
    }

    #[test]
    fn test_from_str_round_trip() {
        let original = ReportId::generate();
        let parsed: ReportId = original.as_str().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_serde_round_trip() {
        let id = ReportId::parse("a1b2c3d4").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"a1b2c3d4\"");

        let back: ReportId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<ReportId, _> = serde_json::from_str("\"not-hex!\"");
        assert!(result.is_err());
    }
}
