//! Gatekeeper configuration
//!
//! The thresholds and weights below are heuristic policy, tuned by hand. The
//! defaults are the production values; deployments may override them from
//! TOML.

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// Eight ASCII digits followed by a check letter
pub const DEFAULT_NATIONAL_ID_PATTERN: &str = r"^[0-9]{8}[A-Za-z]$";

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Names shorter than this (in characters) are reported as missing
    pub min_name_chars: usize,

    /// Document numbers shorter than this (in characters) are reported as missing
    pub min_document_number_chars: usize,

    /// Expected shape of a national id number
    pub national_id_pattern: String,

    /// Ages above this are reported as implausible
    pub max_age_years: i32,

    /// Extractor confidence below this triggers a manual review warning
    pub manual_review_threshold: u8,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_chars: 2,
            min_document_number_chars: 3,
            national_id_pattern: DEFAULT_NATIONAL_ID_PATTERN.to_string(),
            max_age_years: 120,
            manual_review_threshold: 60,
        }
    }
}

impl ValidationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.max_age_years <= 0 {
            return Err(GatekeeperError::Config(
                "max_age_years must be greater than 0".to_string(),
            ));
        }
        if self.manual_review_threshold > 100 {
            return Err(GatekeeperError::Config(
                "manual_review_threshold cannot exceed 100".to_string(),
            ));
        }
        regex::Regex::new(&self.national_id_pattern)?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GatekeeperError> {
        toml::from_str(toml_str)
            .map_err(|e| GatekeeperError::Config(format!("Failed to parse TOML: {}", e)))
    }
}

/// Weights for the extraction confidence heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score every extraction starts from
    pub base: u32,

    /// Bonus for a present name
    pub full_name: u32,

    /// Bonus for a present document number
    pub document_number: u32,

    /// Bonus for a known document type
    pub document_type: u32,

    /// Bonus for a present birth date
    pub birth_date: u32,

    /// Bonus for a present address
    pub address: u32,

    /// Bonus for a present nationality
    pub nationality: u32,

    /// Bonus for a present gender
    pub gender: u32,

    /// Final scores are clamped to this value (never above 95)
    pub ceiling: u32,

    /// Names need at least this many characters to count as present
    pub min_name_chars: usize,

    /// Document numbers need at least this many characters to count as present
    pub min_document_number_chars: usize,

    /// Addresses need at least this many characters to count as present
    pub min_address_chars: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 40,
            full_name: 20,
            document_number: 20,
            document_type: 10,
            birth_date: 10,
            address: 5,
            nationality: 3,
            gender: 2,
            ceiling: 95,
            min_name_chars: 2,
            min_document_number_chars: 3,
            min_address_chars: 4,
        }
    }
}

impl ScoringWeights {
    /// Validate the weights
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if self.ceiling > 95 {
            return Err(GatekeeperError::Config(
                "ceiling cannot exceed 95".to_string(),
            ));
        }
        if self.base > self.ceiling {
            return Err(GatekeeperError::Config(
                "base cannot exceed ceiling".to_string(),
            ));
        }
        let bonuses = [
            self.full_name,
            self.document_number,
            self.document_type,
            self.birth_date,
            self.address,
            self.nationality,
            self.gender,
        ];
        bonuses
            .iter()
            .try_fold(self.base, |total, bonus| total.checked_add(*bonus))
            .ok_or_else(|| GatekeeperError::Config("weights overflow when summed".to_string()))?;
        Ok(())
    }

    /// Load weights from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, GatekeeperError> {
        toml::from_str(toml_str)
            .map_err(|e| GatekeeperError::Config(format!("Failed to parse TOML: {}", e)))
    }
}
