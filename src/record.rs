//! The identity record: an identifier plus its signing key.

use serde::{Deserialize, Serialize};

/// The plain identifier + signing-key pair the user manages.
///
/// Both fields are opaque to the codec: no semantic validation is applied
/// beyond non-emptiness. Serialized with camelCase keys (`identifier`,
/// `signingKey`) so the token payload matches the wire form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Identifier, typically a DID.
    pub identifier: String,

    /// Signing key associated with the identifier.
    pub signing_key: String,
}

impl Record {
    /// Create a new record.
    pub fn new(identifier: impl Into<String>, signing_key: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            signing_key: signing_key.into(),
        }
    }

    /// A record is complete iff both fields are non-empty.
    ///
    /// Incomplete records must never be encoded into a token.
    pub fn is_complete(&self) -> bool {
        !self.identifier.is_empty() && !self.signing_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_record() {
        let record = Record::new("did:example:1", "k-secret");
        assert!(record.is_complete());
    }

    #[test]
    fn test_incomplete_record() {
        assert!(!Record::new("", "k-secret").is_complete());
        assert!(!Record::new("did:example:1", "").is_complete());
        assert!(!Record::new("", "").is_complete());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let record = Record::new("did:example:1", "k-secret");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"identifier\""));
        assert!(json.contains("\"signingKey\""));
    }

    #[test]
    fn test_json_missing_field_is_rejected() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"identifier":"did:example:1"}"#);
        assert!(result.is_err());
    }
}
