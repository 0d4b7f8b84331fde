//! Duplicate match policy
//!
//! Weights and cutoffs are hand-tuned heuristics kept for compatibility with
//! existing registries. They favour precision: a false "probable duplicate"
//! blocks an operator, so a name alone never reaches the cutoff.

use crate::MatcherError;
use serde::{Deserialize, Serialize};

/// Scoring policy for duplicate detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Bonus for an exact, case-sensitive document number match
    pub document_number_weight: u32,

    /// Bonus for a name similarity strictly above `name_threshold`
    pub name_weight: u32,

    /// Name similarity must exceed this (0.0-1.0)
    pub name_threshold: f64,

    /// Bonus for an equal birth date
    pub birth_date_weight: u32,

    /// Scores at or above this are duplicates
    pub duplicate_cutoff: u32,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            document_number_weight: 100,
            name_weight: 50,
            name_threshold: 0.8,
            birth_date_weight: 30,
            duplicate_cutoff: 80,
        }
    }
}

impl MatchPolicy {
    /// Validate the policy
    pub fn validate(&self) -> Result<(), MatcherError> {
        if !(0.0..=1.0).contains(&self.name_threshold) {
            return Err(MatcherError::Config(format!(
                "name_threshold {} is outside [0.0, 1.0]",
                self.name_threshold
            )));
        }
        if self.duplicate_cutoff == 0 {
            return Err(MatcherError::Config(
                "duplicate_cutoff must be greater than 0".to_string(),
            ));
        }
        self.document_number_weight
            .checked_add(self.name_weight)
            .and_then(|total| total.checked_add(self.birth_date_weight))
            .ok_or_else(|| MatcherError::Config("weights overflow when summed".to_string()))?;
        Ok(())
    }

    /// Load policy from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, MatcherError> {
        toml::from_str(toml_str)
            .map_err(|e| MatcherError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize policy to TOML string
    pub fn to_toml(&self) -> Result<String, MatcherError> {
        toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(MatchPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_default_policy_requires_corroboration() {
        let policy = MatchPolicy::default();
        assert!(policy.document_number_weight >= policy.duplicate_cutoff);
        assert!(policy.name_weight < policy.duplicate_cutoff);
        assert!(policy.name_weight + policy.birth_date_weight >= policy.duplicate_cutoff);
    }

    #[test]
    fn test_invalid_threshold() {
        let policy = MatchPolicy {
            name_threshold: 1.5,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_overflowing_weights_rejected() {
        let policy = MatchPolicy::from_toml("name_weight = 4294967295").unwrap();
        assert!(policy.validate().is_err());
        assert!(crate::DuplicateMatcher::new(policy).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let policy = MatchPolicy::default();
        let parsed = MatchPolicy::from_toml(&policy.to_toml().unwrap()).unwrap();
        assert_eq!(policy, parsed);
    }
}
