//! Field validation logic

use crate::config::DEFAULT_NATIONAL_ID_PATTERN;
use crate::{GatekeeperError, ValidationConfig};
use chrono::{Datelike, Local, NaiveDate};
use dossier_domain::{parse_document_date, DateParseError, DocumentType, ExtractedFields};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static DEFAULT_NATIONAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_NATIONAL_ID_PATTERN).expect("static regex"));

/// Result of field validation
///
/// Validation annotates, it does not gatekeep: `errors` stays empty and
/// callers always proceed, surfacing `warnings` to the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// Issues an operator should review
    pub warnings: Vec<ValidationWarning>,

    /// Blocking issues (reserved, never populated)
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// Whether the record may proceed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether anything needs review
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings rendered as human-readable messages
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// A reviewable issue found in extracted fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationWarning {
    /// Name missing or too short
    MissingName,

    /// Document number missing or too short
    MissingDocumentNumber,

    /// Document type not determined
    MissingDocumentType,

    /// National id number does not have the expected shape
    NationalIdFormat {
        /// The number as extracted
        document_number: String,
    },

    /// Birth date is not `DD/MM/YYYY`
    BirthDateFormat {
        /// The date as extracted
        value: String,
    },

    /// Birth date has the right shape but is not a real day
    BirthDateInvalid {
        /// The date as extracted
        value: String,
    },

    /// Age computed from the birth date is negative or too large
    ImplausibleAge {
        /// Completed years at the reference date
        age: i32,
    },

    /// Birth date lies after the reference date
    BirthDateInFuture {
        /// The parsed birth date
        date: NaiveDate,
    },

    /// The extractor itself was unsure
    LowConfidence {
        /// Extractor-reported confidence
        confidence: u8,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::MissingName => {
                write!(f, "Name is missing or too short")
            }
            ValidationWarning::MissingDocumentNumber => {
                write!(f, "Document number is missing or too short")
            }
            ValidationWarning::MissingDocumentType => {
                write!(f, "Document type could not be determined")
            }
            ValidationWarning::NationalIdFormat { document_number } => write!(
                f,
                "Document number '{}' does not match the national id format (8 digits and a letter)",
                document_number
            ),
            ValidationWarning::BirthDateFormat { value } => {
                write!(f, "Birth date '{}' is not in DD/MM/YYYY format", value)
            }
            ValidationWarning::BirthDateInvalid { value } => {
                write!(f, "Birth date '{}' is not a valid calendar date", value)
            }
            ValidationWarning::ImplausibleAge { age } => {
                write!(f, "Age computed from birth date is implausible ({} years)", age)
            }
            ValidationWarning::BirthDateInFuture { date } => {
                write!(f, "Birth date {} is in the future", date.format("%d/%m/%Y"))
            }
            ValidationWarning::LowConfidence { confidence } => write!(
                f,
                "Low extraction confidence ({}%), manual review recommended",
                confidence
            ),
        }
    }
}

/// Validates extracted fields against structural and semantic rules
pub struct FieldValidator {
    config: ValidationConfig,
    national_id: Regex,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self {
            config: ValidationConfig::default(),
            national_id: DEFAULT_NATIONAL_ID.clone(),
        }
    }
}

impl FieldValidator {
    /// Create a new validator with the given configuration
    pub fn new(config: ValidationConfig) -> Result<Self, GatekeeperError> {
        config.validate()?;
        let national_id = Regex::new(&config.national_id_pattern)?;
        Ok(Self {
            config,
            national_id,
        })
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Get the active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate fields as of a reference date
    ///
    /// Pure and deterministic: the same fields and date always produce the
    /// same warnings, in rule order.
    pub fn validate(&self, fields: &ExtractedFields, as_of: NaiveDate) -> ValidationOutcome {
        let mut warnings = Vec::new();

        // 1. Presence
        if char_len(&fields.full_name) < self.config.min_name_chars {
            warnings.push(ValidationWarning::MissingName);
        }
        if char_len(&fields.document_number) < self.config.min_document_number_chars {
            warnings.push(ValidationWarning::MissingDocumentNumber);
        }
        if !fields.document_type.is_known() {
            warnings.push(ValidationWarning::MissingDocumentType);
        }

        // 2. National id shape
        if let Some(warning) = self.check_national_id(fields) {
            warnings.push(warning);
        }

        // 3. Birth date plausibility
        warnings.extend(self.check_birth_date(fields, as_of));

        // 4. Extractor self-reported confidence
        if fields.confidence < self.config.manual_review_threshold {
            warnings.push(ValidationWarning::LowConfidence {
                confidence: fields.confidence,
            });
        }

        ValidationOutcome {
            warnings,
            errors: Vec::new(),
        }
    }

    /// Validate fields as of today's local date
    pub fn validate_today(&self, fields: &ExtractedFields) -> ValidationOutcome {
        self.validate(fields, Local::now().date_naive())
    }

    fn check_national_id(&self, fields: &ExtractedFields) -> Option<ValidationWarning> {
        let number = fields.document_number.trim();
        if fields.document_type != DocumentType::NationalId || number.is_empty() {
            return None;
        }

        if self.national_id.is_match(number) {
            None
        } else {
            Some(ValidationWarning::NationalIdFormat {
                document_number: number.to_string(),
            })
        }
    }

    fn check_birth_date(&self, fields: &ExtractedFields, as_of: NaiveDate) -> Vec<ValidationWarning> {
        let value = fields.birth_date.trim();
        let birth = match parse_document_date(value) {
            Ok(date) => date,
            Err(DateParseError::Empty) => return Vec::new(),
            Err(DateParseError::Format) => {
                return vec![ValidationWarning::BirthDateFormat {
                    value: value.to_string(),
                }]
            }
            Err(DateParseError::Calendar) => {
                return vec![ValidationWarning::BirthDateInvalid {
                    value: value.to_string(),
                }]
            }
        };

        let mut warnings = Vec::new();
        let age = age_in_years(birth, as_of);
        if age < 0 || age > self.config.max_age_years {
            warnings.push(ValidationWarning::ImplausibleAge { age });
        }
        if birth > as_of {
            warnings.push(ValidationWarning::BirthDateInFuture { date: birth });
        }
        warnings
    }
}

/// Completed years between `birth` and `as_of`; negative for future births
fn age_in_years(birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}
