//! Dossier Gatekeeper
//!
//! Annotates freshly extracted identity fields before anything else looks at
//! them.
//!
//! The Gatekeeper provides:
//! - Field validation (presence, national id shape, birth date plausibility)
//! - Extraction confidence scoring (field coverage heuristic)
//!
//! Validation never blocks: it accumulates human-readable warnings for an
//! operator and always reports the record as valid.
//!
//! # Examples
//!
//! ```
//! use dossier_gatekeeper::{ConfidenceScorer, FieldValidator};
//! use dossier_domain::ExtractedFields;
//! use chrono::NaiveDate;
//!
//! let fields = ExtractedFields::default();
//! let as_of = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//! let outcome = FieldValidator::default_config().validate(&fields, as_of);
//! assert!(outcome.is_valid());
//! assert!(outcome.warnings.len() >= 4);
//!
//! let score = ConfidenceScorer::default().score(&fields);
//! assert_eq!(score.value(), 40);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod scorer;
mod validator;

pub use config::{ScoringWeights, ValidationConfig, DEFAULT_NATIONAL_ID_PATTERN};
pub use error::GatekeeperError;
pub use scorer::ConfidenceScorer;
pub use validator::{FieldValidator, ValidationOutcome, ValidationWarning};
