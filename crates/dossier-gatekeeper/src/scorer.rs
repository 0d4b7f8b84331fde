//! Extraction confidence scoring
//!
//! An additive completeness heuristic: each present field adds a fixed bonus
//! to a base score. It measures coverage, not correctness, so a record full
//! of misread text still scores well. Pair it with [`crate::FieldValidator`]
//! warnings before trusting a record.

use crate::{GatekeeperError, ScoringWeights};
use dossier_domain::{ConfidenceScore, ExtractedFields};

/// Computes a [`ConfidenceScore`] from field coverage
#[derive(Debug, Clone, Default)]
pub struct ConfidenceScorer {
    weights: ScoringWeights,
}

impl ConfidenceScorer {
    /// Create a scorer with custom weights
    pub fn new(weights: ScoringWeights) -> Result<Self, GatekeeperError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Get the active weights
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a record
    pub fn score(&self, fields: &ExtractedFields) -> ConfidenceScore {
        let w = &self.weights;
        let mut score = w.base;

        if present(&fields.full_name, w.min_name_chars) {
            score = score.saturating_add(w.full_name);
        }
        if present(&fields.document_number, w.min_document_number_chars) {
            score = score.saturating_add(w.document_number);
        }
        if fields.document_type.is_known() {
            score = score.saturating_add(w.document_type);
        }
        if present(&fields.birth_date, 1) {
            score = score.saturating_add(w.birth_date);
        }

        // Secondary fields
        if present(&fields.address, w.min_address_chars) {
            score = score.saturating_add(w.address);
        }
        if present(&fields.nationality, 1) {
            score = score.saturating_add(w.nationality);
        }
        if present(&fields.gender, 1) {
            score = score.saturating_add(w.gender);
        }

        ConfidenceScore::new(score.min(w.ceiling))
    }
}

fn present(value: &str, min_chars: usize) -> bool {
    let len = value.trim().chars().count();
    len > 0 && len >= min_chars
}


#[cfg(test)]
mod overflow_tests {
    use super::*;
    use dossier_domain::DocumentType;

    #[test]
    fn test_huge_weights_saturate_to_ceiling() {
        let scorer = ConfidenceScorer {
            weights: ScoringWeights {
                full_name: u32::MAX,
                document_number: u32::MAX,
                ..Default::default()
            },
        };
        let fields = ExtractedFields {
            full_name: "Ana García".to_string(),
            document_number: "12345678Z".to_string(),
            document_type: DocumentType::NationalId,
            ..Default::default()
        };
        assert_eq!(scorer.score(&fields).value(), 95);
    }
}
