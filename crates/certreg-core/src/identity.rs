//! # Certificate Identifiers
//!
//! Certificates are keyed by a server-generated UUIDv4 rendered as text.
//! Lookups accept arbitrary caller-supplied strings: an id that was never
//! issued simply finds nothing, so [`CertificateId`] does not validate its
//! contents on construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary key of a certificate record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(String);

impl CertificateId {
    /// Generate a fresh identifier from a random UUIDv4.
    ///
    /// Uniqueness is probabilistic (122 random bits); ids are never reused.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an identifier received from a caller or read from storage.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the owned text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_uuids() {
        let id = CertificateId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok(), "not a uuid: {id}");
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<CertificateId> = (0..1000).map(|_| CertificateId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn arbitrary_text_is_accepted() {
        let id = CertificateId::new("not-a-uuid");
        assert_eq!(id.as_str(), "not-a-uuid");
        assert_eq!(id.to_string(), "not-a-uuid");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CertificateId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
