//! Registry records: the comparison universe and the canonical output

use crate::ClientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal projection of a client already present in the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingRecord {
    /// Registry identifier
    pub id: ClientId,

    /// Full name as stored
    pub full_name: String,

    /// Document number, if one was ever recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,

    /// Birth date, stored as a calendar date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl ExistingRecord {
    /// Create a record with only a name
    pub fn new(id: ClientId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            document_number: None,
            birth_date: None,
        }
    }

    /// Attach a document number
    pub fn with_document_number(mut self, document_number: impl Into<String>) -> Self {
        self.document_number = Some(document_number.into());
        self
    }

    /// Attach a birth date
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}

/// Handling priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
}

impl Priority {
    /// Parse a priority, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a client record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Awaiting operator review
    #[default]
    Pending,
    /// Being worked on
    Active,
    /// Finished
    Closed,
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordSource {
    /// Created from a scanned identity document
    #[default]
    DocumentOrigin,
    /// Typed in by an operator
    Manual,
}

/// Key dates attached to a client record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyDates {
    /// Date the document was processed
    pub first_contact: NaiveDate,

    /// Birth date as `YYYY-MM-DD`, or empty when it could not be parsed
    pub birthday: String,
}

/// A validated, normalized record ready for persistence
///
/// This is the only artifact of the pipeline that outlives it: the caller
/// hands it to a persistence layer or uses it to pre-fill a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Identifier assigned at mapping time
    pub id: ClientId,

    /// Trimmed full name
    pub name: String,

    /// Document number, as extracted
    pub document_number: String,

    /// Document type tag, as extracted
    pub document_type: String,

    /// Nationality, as extracted
    pub nationality: String,

    /// Address, as extracted
    pub address: String,

    /// Gender, as extracted
    pub gender: String,

    /// Case category
    pub category: String,

    /// Provenance note
    pub notes: String,

    /// Lifecycle status
    pub status: ClientStatus,

    /// Handling priority
    pub priority: Priority,

    /// Record origin
    pub source: RecordSource,

    /// Whether the client pays in cash
    pub paid_in_cash: bool,

    /// Key dates
    pub key_dates: KeyDates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" low "), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_existing_record_builder() {
        let date = NaiveDate::from_ymd_opt(1990, 7, 15).unwrap();
        let record = ExistingRecord::new(ClientId::from_value(1), "Ana García")
            .with_document_number("12345678Z")
            .with_birth_date(date);

        assert_eq!(record.document_number.as_deref(), Some("12345678Z"));
        assert_eq!(record.birth_date, Some(date));
    }

    #[test]
    fn test_existing_record_json_optional_fields() {
        let json = format!(r#"{{ "id": "{}", "fullName": "Ana" }}"#, ClientId::from_value(7));
        let record: ExistingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.full_name, "Ana");
        assert!(record.document_number.is_none());
        assert!(record.birth_date.is_none());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(ClientStatus::Pending).unwrap(), "pending");
        assert_eq!(serde_json::to_value(RecordSource::DocumentOrigin).unwrap(), "document-origin");
        assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "medium");
    }
}
