//! Extraction confidence score

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completeness score of a single extraction, in `[0, 95]`
///
/// The score rewards field coverage, not field correctness: a document with
/// every field filled in with garbage still scores high. It never reaches 100
/// so that an automatically extracted record always reads as partially
/// uncertain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    /// Highest score an extraction can reach
    pub const CEILING: u8 = 95;

    /// Create a score, clamping to [`ConfidenceScore::CEILING`]
    pub fn new(value: u32) -> Self {
        Self(value.min(Self::CEILING as u32) as u8)
    }

    /// Get the raw percentage value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_to_ceiling() {
        assert_eq!(ConfidenceScore::new(100).value(), 95);
        assert_eq!(ConfidenceScore::new(u32::MAX).value(), 95);
    }

    #[test]
    fn test_score_below_ceiling_untouched() {
        assert_eq!(ConfidenceScore::new(40).value(), 40);
        assert_eq!(ConfidenceScore::new(95).value(), 95);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfidenceScore::new(70).to_string(), "70%");
    }
}
