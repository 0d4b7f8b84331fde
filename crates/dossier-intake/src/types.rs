//! Pipeline stages and results

use dossier_domain::{CanonicalRecord, CategorySuggestion, ConfidenceScore, ExtractedFields};
use dossier_gatekeeper::ValidationOutcome;
use dossier_matcher::MatchResult;
use serde::Serialize;
use std::fmt;

/// Where a single reconciliation currently is
///
/// Stages advance strictly in order. `Failed` is only reachable from
/// `Received`: once fields exist, the pipeline always completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Document or fields handed in
    Received,
    /// Fields annotated with warnings
    Validated,
    /// Completeness score computed
    Scored,
    /// Registry scanned for duplicates
    Matched,
    /// Canonical record built
    Mapped,
    /// Result handed back
    Completed,
    /// Extraction failed
    Failed,
}

impl PipelineStage {
    /// The stage after this one on the success path
    pub fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Received => Some(PipelineStage::Validated),
            PipelineStage::Validated => Some(PipelineStage::Scored),
            PipelineStage::Scored => Some(PipelineStage::Matched),
            PipelineStage::Matched => Some(PipelineStage::Mapped),
            PipelineStage::Mapped => Some(PipelineStage::Completed),
            PipelineStage::Completed | PipelineStage::Failed => None,
        }
    }

    /// Whether this stage may transition to `Failed`
    pub fn can_fail(self) -> bool {
        self == PipelineStage::Received
    }

    /// Whether no further transition is possible
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Completed | PipelineStage::Failed)
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Validated => "validated",
            PipelineStage::Scored => "scored",
            PipelineStage::Matched => "matched",
            PipelineStage::Mapped => "mapped",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the record's category was decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CategoryOutcome {
    /// The suggestion collaborator answered
    Suggested {
        /// The accepted suggestion
        suggestion: CategorySuggestion,
    },

    /// The default category was used
    Fallback {
        /// Why no suggestion was used
        reason: String,
    },
}

impl CategoryOutcome {
    /// Whether the default category was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, CategoryOutcome::Fallback { .. })
    }
}

/// Everything one reconciliation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Record ready for persistence or form pre-fill
    pub record: CanonicalRecord,

    /// Fields the record was built from
    pub fields: ExtractedFields,

    /// Warnings to surface to the operator
    pub validation: ValidationOutcome,

    /// Completeness score
    pub confidence: ConfidenceScore,

    /// Duplicate detection result
    pub duplicate: MatchResult,

    /// How the category was decided
    pub category: CategoryOutcome,

    /// Final stage, always `Completed`
    pub stage: PipelineStage,
}

impl ReconciliationResult {
    /// Validation warnings as human-readable messages
    pub fn warnings(&self) -> Vec<String> {
        self.validation.messages()
    }

    /// Whether an operator should look at this record before saving it
    pub fn needs_review(&self) -> bool {
        self.validation.has_warnings() || self.duplicate.is_duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_sequence() {
        let mut stage = PipelineStage::Received;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            stage = next;
            seen.push(stage);
        }

        assert_eq!(
            seen,
            vec![
                PipelineStage::Received,
                PipelineStage::Validated,
                PipelineStage::Scored,
                PipelineStage::Matched,
                PipelineStage::Mapped,
                PipelineStage::Completed,
            ]
        );
        assert!(stage.is_terminal());
    }

    #[test]
    fn test_only_received_can_fail() {
        assert!(PipelineStage::Received.can_fail());
        assert!(!PipelineStage::Validated.can_fail());
        assert!(!PipelineStage::Mapped.can_fail());
        assert_eq!(PipelineStage::Failed.next(), None);
    }

    #[test]
    fn test_category_outcome_wire_shape() {
        let outcome = CategoryOutcome::Fallback {
            reason: "timeout".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "fallback");
        assert_eq!(json["reason"], "timeout");
        assert!(outcome.is_fallback());
    }
}
