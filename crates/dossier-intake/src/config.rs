//! Configuration for intake

use crate::IntakeError;
use dossier_gatekeeper::{ScoringWeights, ValidationConfig};
use dossier_matcher::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Category used when no suggestion is available
pub const DEFAULT_CATEGORY: &str = "general inquiry";

/// Configuration for the reconciliation pipeline and its LLM collaborators
///
/// One TOML document configures every stage; the nested tables fall back to
/// their own defaults when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Largest document accepted, in bytes
    pub max_document_bytes: usize,

    /// MIME types the extraction collaborator can read
    pub accepted_mime_types: Vec<String>,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum time for a single category suggestion call (seconds)
    pub suggestion_timeout_secs: u64,

    /// Category assigned when the suggestion is missing or fails
    pub default_category: String,

    /// Categories offered to the model when it suggests one
    pub categories: Vec<String>,

    /// Registries at least this large are scanned in parallel
    pub parallel_match_threshold: usize,

    /// Field validation rules
    pub validation: ValidationConfig,

    /// Confidence scoring weights
    pub scoring: ScoringWeights,

    /// Duplicate detection policy
    pub matching: MatchPolicy,
}

impl IntakeConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Get the suggestion timeout as a Duration
    pub fn suggestion_timeout(&self) -> Duration {
        Duration::from_secs(self.suggestion_timeout_secs)
    }

    /// Whether a declared MIME type is accepted (case-insensitive)
    pub fn accepts(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim();
        self.accepted_mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(mime_type))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.max_document_bytes == 0 {
            return Err(IntakeError::Config(
                "max_document_bytes must be greater than 0".to_string(),
            ));
        }
        if self.accepted_mime_types.is_empty() {
            return Err(IntakeError::Config(
                "accepted_mime_types must not be empty".to_string(),
            ));
        }
        if self.extraction_timeout_secs == 0 {
            return Err(IntakeError::Config(
                "extraction_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.suggestion_timeout_secs == 0 {
            return Err(IntakeError::Config(
                "suggestion_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.default_category.trim().is_empty() {
            return Err(IntakeError::Config(
                "default_category must not be empty".to_string(),
            ));
        }
        self.validation.validate()?;
        self.scoring.validate()?;
        self.matching.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, IntakeError> {
        toml::from_str(toml_str)
            .map_err(|e| IntakeError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, IntakeError> {
        toml::to_string_pretty(self)
            .map_err(|e| IntakeError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for IntakeConfig {
    /// Default configuration for phone photos and a local vision model
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            accepted_mime_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            extraction_timeout_secs: 120,
            suggestion_timeout_secs: 30,
            default_category: DEFAULT_CATEGORY.to_string(),
            categories: [
                DEFAULT_CATEGORY,
                "residency",
                "nationality",
                "family reunification",
                "work permit",
                "asylum",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            parallel_match_threshold: 5_000,
            validation: ValidationConfig::default(),
            scoring: ScoringWeights::default(),
            matching: MatchPolicy::default(),
        }
    }
}

impl IntakeConfig {
    /// Strict preset: smaller documents, short timeouts
    pub fn strict() -> Self {
        Self {
            max_document_bytes: 4 * 1024 * 1024,
            extraction_timeout_secs: 60,
            suggestion_timeout_secs: 15,
            ..Self::default()
        }
    }

    /// Lenient preset: large scans, slow hardware
    pub fn lenient() -> Self {
        Self {
            max_document_bytes: 25 * 1024 * 1024,
            extraction_timeout_secs: 300,
            suggestion_timeout_secs: 60,
            ..Self::default()
        }
    }
}
