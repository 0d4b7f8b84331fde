//! Raw extraction output

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of identity document the fields were read from
///
/// `Unknown` stands for "the extractor could not tell", which validation and
/// scoring treat as a missing document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    /// National identity card
    NationalId,
    /// Identity card issued to foreign residents
    ForeignResidentId,
    /// Passport
    Passport,
    /// Driving license
    DrivingLicense,
    /// Recognized as a document, but of some other kind
    Other,
    /// Not determined
    #[default]
    Unknown,
}

impl DocumentType {
    /// Every document type, in declaration order
    pub const ALL: [DocumentType; 6] = [
        DocumentType::NationalId,
        DocumentType::ForeignResidentId,
        DocumentType::Passport,
        DocumentType::DrivingLicense,
        DocumentType::Other,
        DocumentType::Unknown,
    ];

    /// The kebab-case wire tag
    pub fn as_tag(&self) -> &'static str {
        match self {
            DocumentType::NationalId => "national-id",
            DocumentType::ForeignResidentId => "foreign-resident-id",
            DocumentType::Passport => "passport",
            DocumentType::DrivingLicense => "driving-license",
            DocumentType::Other => "other",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Map free text reported by an extractor to a document type
    ///
    /// Matching is case-insensitive and looks for markers anywhere in the
    /// text, so `"DNI (national-id)"` and `"Spanish DNI"` both resolve to
    /// [`DocumentType::NationalId`]. Empty text is `Unknown`; unrecognized
    /// text is `Other`.
    pub fn parse_lenient(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if text.is_empty() || text == "unknown" {
            return DocumentType::Unknown;
        }

        let has_word = |word: &str| {
            text.split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };

        if text.contains("foreign-resident") || text.contains("foreign resident") || has_word("nie") {
            DocumentType::ForeignResidentId
        } else if text.contains("national-id") || text.contains("national id") || has_word("dni") {
            DocumentType::NationalId
        } else if text.contains("passport") || text.contains("pasaporte") {
            DocumentType::Passport
        } else if text.contains("driving") || text.contains("driver") || text.contains("licen") {
            DocumentType::DrivingLicense
        } else {
            DocumentType::Other
        }
    }

    /// Whether the extractor determined a document type at all
    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl From<String> for DocumentType {
    fn from(text: String) -> Self {
        DocumentType::parse_lenient(&text)
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        doc_type.as_tag().to_string()
    }
}

/// Field guesses read off a photographed identity document
///
/// Every field may be empty: absence is a scoring signal, never an error.
/// Instances are created once per processed document and not mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// Full name as printed
    #[serde(default, deserialize_with = "empty_if_null")]
    pub full_name: String,

    /// Document number as printed
    #[serde(default, deserialize_with = "empty_if_null")]
    pub document_number: String,

    /// Document kind
    #[serde(default, deserialize_with = "lenient_document_type")]
    pub document_type: DocumentType,

    /// Birth date, expected as `DD/MM/YYYY`
    #[serde(default, deserialize_with = "empty_if_null")]
    pub birth_date: String,

    /// Postal address
    #[serde(default, deserialize_with = "empty_if_null")]
    pub address: String,

    /// Nationality
    #[serde(default, deserialize_with = "empty_if_null")]
    pub nationality: String,

    /// Gender
    #[serde(default, deserialize_with = "empty_if_null")]
    pub gender: String,

    /// Issue date, as printed
    #[serde(default, deserialize_with = "empty_if_null")]
    pub issue_date: String,

    /// Expiry date, as printed
    #[serde(default, deserialize_with = "empty_if_null")]
    pub expiry_date: String,

    /// Confidence reported by the extractor itself, in `[0, 100]`
    #[serde(default, deserialize_with = "clamped_confidence")]
    pub confidence: u8,
}

impl ExtractedFields {
    /// Highest extractor-reported confidence
    pub const MAX_CONFIDENCE: u8 = 100;
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_document_type<'de, D>(deserializer: D) -> Result<DocumentType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|text| DocumentType::parse_lenient(&text))
        .unwrap_or_default())
}

/// Extractors report confidence as integers, floats, or null
fn clamped_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, ExtractedFields::MAX_CONFIDENCE as f64) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_tags_round_trip() {
        for doc_type in DocumentType::ALL {
            assert_eq!(DocumentType::parse_lenient(doc_type.as_tag()), doc_type);
        }
    }

    #[test]
    fn test_document_type_lenient_markers() {
        assert_eq!(DocumentType::parse_lenient("DNI"), DocumentType::NationalId);
        assert_eq!(DocumentType::parse_lenient("Spanish national ID card"), DocumentType::NationalId);
        assert_eq!(DocumentType::parse_lenient("NIE"), DocumentType::ForeignResidentId);
        assert_eq!(DocumentType::parse_lenient("Passport"), DocumentType::Passport);
        assert_eq!(DocumentType::parse_lenient("driver's license"), DocumentType::DrivingLicense);
        assert_eq!(DocumentType::parse_lenient("library card"), DocumentType::Other);
        assert_eq!(DocumentType::parse_lenient(""), DocumentType::Unknown);
    }

    #[test]
    fn test_dni_marker_is_a_whole_word() {
        // "dnipro" is a city, not a document marker
        assert_eq!(DocumentType::parse_lenient("dnipro residence card"), DocumentType::Other);
    }

    #[test]
    fn test_deserialize_full_payload() {
        let json = r#"{
            "fullName": "Ana García López",
            "documentNumber": "12345678Z",
            "documentType": "national-id",
            "birthDate": "15/07/1990",
            "address": "Calle Mayor 1, Madrid",
            "nationality": "ESP",
            "gender": "F",
            "issueDate": "01/01/2020",
            "expiryDate": "01/01/2030",
            "confidence": 87
        }"#;

        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.full_name, "Ana García López");
        assert_eq!(fields.document_type, DocumentType::NationalId);
        assert_eq!(fields.confidence, 87);
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_null() {
        let json = r#"{ "fullName": null, "documentType": null, "confidence": null }"#;
        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.document_type, DocumentType::Unknown);
        assert_eq!(fields.confidence, 0);

        let json = r#"{ "fullName": null, "confidence": 140.6 }"#;
        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.full_name, "");
        assert_eq!(fields.document_type, DocumentType::Unknown);
        assert_eq!(fields.confidence, 100);
    }

    #[test]
    fn test_serialize_uses_tags() {
        let fields = ExtractedFields {
            document_type: DocumentType::ForeignResidentId,
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["documentType"], "foreign-resident-id");
    }
}
