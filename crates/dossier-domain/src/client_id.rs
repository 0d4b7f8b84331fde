//! Client identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a client record based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, so records created
/// from successive document scans sort in intake order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(u128);

impl ClientId {
    /// Generate a new UUIDv7-based ClientId
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::ClientId;
    ///
    /// let id = ClientId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a ClientId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a ClientId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_domain::ClientId;
    ///
    /// let id = ClientId::new();
    /// let parsed = ClientId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid client id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl FromStr for ClientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for ClientId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_string(&value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_ordering() {
        let id1 = ClientId::from_value(1000);
        let id2 = ClientId::from_value(2000);

        assert!(id1 < id2);
    }

    #[test]
    fn test_client_id_display_and_parse() {
        let id = ClientId::new();
        let id_str = id.to_string();

        assert_eq!(id_str.len(), 36);
        assert_eq!(ClientId::from_string(&id_str).unwrap(), id);
    }

    #[test]
    fn test_client_id_invalid_string() {
        assert!(ClientId::from_string("not-a-valid-uuid").is_err());
        assert!(ClientId::from_string("").is_err());
    }

    #[test]
    fn test_client_id_serde_as_string() {
        let id = ClientId::from_value(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let back: ClientId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: round-trip through string representation preserves the id
        #[test]
        fn test_client_id_string_roundtrip(value: u128) {
            let id = ClientId::from_value(value);

            match ClientId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
