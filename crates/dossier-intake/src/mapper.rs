//! Mapping extracted fields to canonical records

use crate::config::DEFAULT_CATEGORY;
use chrono::NaiveDate;
use dossier_domain::{
    format_iso, parse_document_date, CanonicalRecord, ClientId, ClientStatus, ExtractedFields,
    KeyDates, Priority, RecordSource,
};

/// Converts extracted fields into the record shape handed to persistence
///
/// Mapping never fails. Text read off a photo is unreliable, so a date that
/// does not parse is emitted as an empty string instead of aborting.
#[derive(Debug, Clone)]
pub struct RecordMapper {
    default_category: String,
}

impl Default for RecordMapper {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY)
    }
}

impl RecordMapper {
    /// Create a mapper with a custom fallback category
    pub fn new(default_category: impl Into<String>) -> Self {
        Self {
            default_category: default_category.into(),
        }
    }

    /// Category used when no suggestion is supplied
    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Build a canonical record
    ///
    /// A blank suggestion counts as no suggestion. The new record is pending,
    /// medium priority, and dated `processed_on`.
    pub fn to_canonical(
        &self,
        fields: &ExtractedFields,
        suggested_category: Option<&str>,
        processed_on: NaiveDate,
    ) -> CanonicalRecord {
        let category = suggested_category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_category)
            .to_string();

        CanonicalRecord {
            id: ClientId::new(),
            name: fields.full_name.trim().to_string(),
            document_number: fields.document_number.clone(),
            document_type: fields.document_type.as_tag().to_string(),
            nationality: fields.nationality.clone(),
            address: fields.address.clone(),
            gender: fields.gender.clone(),
            category,
            notes: compose_notes(fields),
            status: ClientStatus::Pending,
            priority: Priority::Medium,
            source: RecordSource::DocumentOrigin,
            paid_in_cash: false,
            key_dates: KeyDates {
                first_contact: processed_on,
                birthday: normalize_birth_date(&fields.birth_date),
            },
        }
    }
}

/// `DD/MM/YYYY` to `YYYY-MM-DD`, or empty if it does not parse
pub fn normalize_birth_date(text: &str) -> String {
    parse_document_date(text)
        .map(format_iso)
        .unwrap_or_default()
}

/// Provenance note attached to every automatically created record
pub fn compose_notes(fields: &ExtractedFields) -> String {
    let mut lines = vec![
        format!(
            "Extracted automatically from document. Confidence: {}%.",
            fields.confidence
        ),
        format!("Document type: {}.", fields.document_type.as_tag()),
    ];

    if !fields.issue_date.trim().is_empty() {
        lines.push(format!("Issue date: {}.", fields.issue_date.trim()));
    }
    if !fields.expiry_date.trim().is_empty() {
        lines.push(format!("Expiry date: {}.", fields.expiry_date.trim()));
    }

    lines.join("\n")
}
