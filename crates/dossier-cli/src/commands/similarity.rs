//! Similarity command implementation.

use crate::cli::SimilarityArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, SimilarityReport};
use dossier_matcher::similarity::{distance, name_similarity, similarity};

/// Execute the similarity command.
pub fn execute_similarity(
    args: SimilarityArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let report = compare(&args.a, &args.b, config.intake.matching.name_threshold);
    println!("{}", formatter.format_similarity(&report)?);
    Ok(())
}

/// Compare two strings with the matcher's measures.
pub fn compare(a: &str, b: &str, name_threshold: f64) -> SimilarityReport {
    let name_similarity = name_similarity(a, b);
    SimilarityReport {
        a: a.to_string(),
        b: b.to_string(),
        distance: distance(a, b),
        similarity: similarity(a, b),
        name_similarity,
        name_match: name_similarity > name_threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_is_case_aware() {
        let report = compare("ANA GARCIA", "ana garcia", 0.8);
        assert_eq!(report.distance, 9);
        assert!(report.similarity < 0.2);
        assert_eq!(report.name_similarity, 1.0);
        assert!(report.name_match);
    }

    #[test]
    fn test_compare_threshold_is_strict() {
        // 1 edit in 5 characters is exactly 0.8
        let report = compare("abcde", "abcdx", 0.8);
        assert!((report.name_similarity - 0.8).abs() < 1e-9);
        assert!(!report.name_match);
    }
}
