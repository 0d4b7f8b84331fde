//! Duplicate detection against an existing-records snapshot

use crate::similarity::{normalize_name, similarity};
use crate::{MatchPolicy, MatcherError};
use chrono::NaiveDate;
use dossier_domain::{parse_document_date, ExistingRecord, ExtractedFields};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// A field that contributed to a candidate's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    /// Exact document number
    DocumentNumber,
    /// Similar name
    Name,
    /// Equal birth date
    BirthDate,
}

impl MatchField {
    /// Field name as shown to operators
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::DocumentNumber => "documentNumber",
            MatchField::Name => "name",
            MatchField::BirthDate => "birthDate",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of duplicate detection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Whether `match_score` reached the duplicate cutoff
    pub is_duplicate: bool,

    /// Highest-scoring existing record, if any scored above zero
    pub best_match: Option<ExistingRecord>,

    /// Fields that contributed to the best match, in evaluation order
    pub matching_fields: Vec<MatchField>,

    /// Score of the best match
    pub match_score: u32,
}

/// Score of one existing record against the extracted fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateScore {
    /// Sum of earned bonuses
    pub score: u32,

    /// Fields that earned a bonus
    pub fields: Vec<MatchField>,
}

/// Extracted fields prepared once for comparison against every candidate
struct Query<'a> {
    document_number: Option<&'a str>,
    name: Option<String>,
    birth_date: Option<NaiveDate>,
}

impl<'a> Query<'a> {
    fn new(fields: &'a ExtractedFields) -> Self {
        let name = normalize_name(&fields.full_name);
        Self {
            document_number: non_blank(&fields.document_number),
            name: (!name.is_empty()).then_some(name),
            birth_date: parse_document_date(&fields.birth_date).ok(),
        }
    }
}

/// Best candidate seen so far while scanning
struct Best<'r> {
    score: u32,
    record: Option<&'r ExistingRecord>,
    fields: Vec<MatchField>,
}

impl<'r> Best<'r> {
    fn empty() -> Self {
        Self {
            score: 0,
            record: None,
            fields: Vec::new(),
        }
    }
}

/// Finds the existing record most likely to be the same person
#[derive(Debug, Clone, Default)]
pub struct DuplicateMatcher {
    policy: MatchPolicy,
}

impl DuplicateMatcher {
    /// Create a matcher with a custom policy
    pub fn new(policy: MatchPolicy) -> Result<Self, MatcherError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Get the active policy
    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Compare extracted fields against every existing record, in order
    ///
    /// Only a strictly higher score replaces the current best, so among equal
    /// scores the earliest record wins. An empty snapshot yields a
    /// non-duplicate result with no best match.
    pub fn find_duplicate(
        &self,
        fields: &ExtractedFields,
        existing: &[ExistingRecord],
    ) -> MatchResult {
        let query = Query::new(fields);

        let best = existing.iter().fold(Best::empty(), |best, candidate| {
            let scored = self.score_query(&query, candidate);
            if scored.score > best.score {
                Best {
                    score: scored.score,
                    record: Some(candidate),
                    fields: scored.fields,
                }
            } else {
                best
            }
        });

        self.finish(best, existing.len())
    }

    /// Same as [`DuplicateMatcher::find_duplicate`], scanning candidates in
    /// parallel
    ///
    /// Ties still resolve to the earliest record, so results are identical
    /// to the sequential scan.
    pub fn find_duplicate_parallel(
        &self,
        fields: &ExtractedFields,
        existing: &[ExistingRecord],
    ) -> MatchResult {
        let query = Query::new(fields);

        let best = existing
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| (index, candidate, self.score_query(&query, candidate)))
            .filter(|(_, _, scored)| scored.score > 0)
            .reduce_with(|a, b| {
                let b_wins = b.2.score > a.2.score || (b.2.score == a.2.score && b.0 < a.0);
                if b_wins {
                    b
                } else {
                    a
                }
            });

        let best = match best {
            Some((_, record, scored)) => Best {
                score: scored.score,
                record: Some(record),
                fields: scored.fields,
            },
            None => Best::empty(),
        };

        self.finish(best, existing.len())
    }

    /// Score a single existing record against extracted fields
    pub fn score_candidate(
        &self,
        fields: &ExtractedFields,
        candidate: &ExistingRecord,
    ) -> CandidateScore {
        self.score_query(&Query::new(fields), candidate)
    }

    fn score_query(&self, query: &Query<'_>, candidate: &ExistingRecord) -> CandidateScore {
        let mut result = CandidateScore::default();

        // 1. Document number: exact and case-sensitive
        if let (Some(extracted), Some(stored)) = (
            query.document_number,
            candidate.document_number.as_deref().and_then(non_blank),
        ) {
            if extracted == stored {
                result.score = result.score.saturating_add(self.policy.document_number_weight);
                result.fields.push(MatchField::DocumentNumber);
            }
        }

        // 2. Name similarity
        if let Some(name) = &query.name {
            let stored = normalize_name(&candidate.full_name);
            if !stored.is_empty() && similarity(name, &stored) > self.policy.name_threshold {
                result.score = result.score.saturating_add(self.policy.name_weight);
                result.fields.push(MatchField::Name);
            }
        }

        // 3. Birth date: both sides must be real calendar dates
        if let (Some(extracted), Some(stored)) = (query.birth_date, candidate.birth_date) {
            if extracted == stored {
                result.score = result.score.saturating_add(self.policy.birth_date_weight);
                result.fields.push(MatchField::BirthDate);
            }
        }

        result
    }

    fn finish(&self, best: Best<'_>, scanned: usize) -> MatchResult {
        let is_duplicate = best.score >= self.policy.duplicate_cutoff;

        debug!(
            "Duplicate scan over {} records: best score {}, duplicate: {}",
            scanned, best.score, is_duplicate
        );

        MatchResult {
            is_duplicate,
            best_match: best.record.cloned(),
            matching_fields: best.fields,
            match_score: best.score,
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::ClientId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields(name: &str, number: &str, birth: &str) -> ExtractedFields {
        ExtractedFields {
            full_name: name.to_string(),
            document_number: number.to_string(),
            birth_date: birth.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_registry() {
        let matcher = DuplicateMatcher::default();
        let result = matcher.find_duplicate(&fields("Ana García", "12345678A", "15/07/1990"), &[]);

        assert!(!result.is_duplicate);
        assert!(result.best_match.is_none());
        assert!(result.matching_fields.is_empty());
        assert_eq!(result.match_score, 0);
    }

    #[test]
    fn test_document_number_alone_is_duplicate() {
        let matcher = DuplicateMatcher::default();
        let existing = vec![ExistingRecord::new(ClientId::from_value(1), "Completely Different")
            .with_document_number("12345678A")];

        let result = matcher.find_duplicate(&fields("Ana García", "12345678A", ""), &existing);

        assert!(result.is_duplicate);
        assert_eq!(result.match_score, 100);
        assert_eq!(result.matching_fields, vec![MatchField::DocumentNumber]);
        assert_eq!(result.best_match.unwrap().id, ClientId::from_value(1));
    }

    #[test]
    fn test_document_number_is_case_sensitive() {
        let matcher = DuplicateMatcher::default();
        let candidate = ExistingRecord::new(ClientId::from_value(1), "Other")
            .with_document_number("12345678a");

        let scored = matcher.score_candidate(&fields("", "12345678A", ""), &candidate);
        assert_eq!(scored.score, 0);
    }

    #[test]
    fn test_name_alone_is_not_duplicate() {
        let matcher = DuplicateMatcher::default();
        let existing = vec![ExistingRecord::new(ClientId::from_value(1), "Ana Garcia Lopez")];

        let result = matcher.find_duplicate(&fields("ana garcia lopes", "", ""), &existing);

        assert!(!result.is_duplicate);
        assert_eq!(result.match_score, 50);
        assert_eq!(result.matching_fields, vec![MatchField::Name]);
        assert!(result.best_match.is_some());
    }

    #[test]
    fn test_name_and_birth_date_is_duplicate() {
        let matcher = DuplicateMatcher::default();
        let existing = vec![ExistingRecord::new(ClientId::from_value(1), "Ana Garcia Lopez")
            .with_birth_date(date(1990, 7, 15))];

        let result =
            matcher.find_duplicate(&fields("ana garcia lopes", "", "15/07/1990"), &existing);

        assert!(result.is_duplicate);
        assert_eq!(result.match_score, 80);
        assert_eq!(result.matching_fields, vec![MatchField::Name, MatchField::BirthDate]);
    }

    #[test]
    fn test_name_threshold_is_strict() {
        let policy = MatchPolicy {
            name_threshold: 0.75,
            ..Default::default()
        };
        let matcher = DuplicateMatcher::new(policy).unwrap();
        // similarity exactly 0.75
        let candidate = ExistingRecord::new(ClientId::from_value(1), "abcd");

        let scored = matcher.score_candidate(&fields("abcx", "", ""), &candidate);
        assert_eq!(scored.score, 0);
    }

    #[test]
    fn test_unparseable_birth_date_never_matches() {
        let matcher = DuplicateMatcher::default();
        let candidate = ExistingRecord::new(ClientId::from_value(1), "Zzz")
            .with_birth_date(date(1990, 7, 15));

        let scored = matcher.score_candidate(&fields("", "", "1990-07-15"), &candidate);
        assert_eq!(scored.score, 0);
    }

    #[test]
    fn test_empty_names_do_not_match() {
        let matcher = DuplicateMatcher::default();
        let candidate = ExistingRecord::new(ClientId::from_value(1), "");

        let scored = matcher.score_candidate(&fields("", "", ""), &candidate);
        assert_eq!(scored.score, 0);
    }

    #[test]
    fn test_highest_score_wins() {
        let matcher = DuplicateMatcher::default();
        let existing = vec![
            ExistingRecord::new(ClientId::from_value(1), "Ana Garcia Lopez"),
            ExistingRecord::new(ClientId::from_value(2), "Ana Garcia Lopez")
                .with_birth_date(date(1990, 7, 15)),
        ];

        let result =
            matcher.find_duplicate(&fields("Ana Garcia Lopez", "", "15/07/1990"), &existing);

        assert_eq!(result.best_match.unwrap().id, ClientId::from_value(2));
        assert_eq!(result.match_score, 80);
    }

    #[test]
    fn test_ties_keep_first_record() {
        let matcher = DuplicateMatcher::default();
        let existing = vec![
            ExistingRecord::new(ClientId::from_value(1), "Ana Garcia Lopez"),
            ExistingRecord::new(ClientId::from_value(2), "Ana Garcia Lopez"),
        ];

        let result = matcher.find_duplicate(&fields("Ana Garcia Lopez", "", ""), &existing);
        assert_eq!(result.best_match.unwrap().id, ClientId::from_value(1));
    }

    #[test]
    fn test_all_bonuses_accumulate() {
        let matcher = DuplicateMatcher::default();
        let candidate = ExistingRecord::new(ClientId::from_value(1), "Ana García")
            .with_document_number("12345678A")
            .with_birth_date(date(1990, 7, 15));

        let scored =
            matcher.score_candidate(&fields("ANA GARCÍA", "12345678A", "15/07/1990"), &candidate);
        assert_eq!(scored.score, 180);
        assert_eq!(
            scored.fields,
            vec![MatchField::DocumentNumber, MatchField::Name, MatchField::BirthDate]
        );
    }

    #[test]
    fn test_parallel_agrees_on_ties() {
        let matcher = DuplicateMatcher::default();
        let existing: Vec<_> = (0..500u128)
            .map(|i| ExistingRecord::new(ClientId::from_value(i), format!("Person {}", i)))
            .chain((500..510u128).map(|i| {
                ExistingRecord::new(ClientId::from_value(i), "Ana Garcia Lopez")
                    .with_birth_date(date(1990, 7, 15))
            }))
            .collect();
        let query = fields("Ana Garcia Lopez", "", "15/07/1990");

        let sequential = matcher.find_duplicate(&query, &existing);
        let parallel = matcher.find_duplicate_parallel(&query, &existing);

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.best_match.unwrap().id, ClientId::from_value(500));
    }

    #[test]
    fn test_huge_weights_saturate() {
        let matcher = DuplicateMatcher {
            policy: MatchPolicy {
                document_number_weight: u32::MAX,
                name_weight: u32::MAX,
                ..Default::default()
            },
        };
        let existing = vec![ExistingRecord::new(ClientId::from_value(1), "Ana García")
            .with_document_number("12345678A")];

        let result = matcher.find_duplicate(&fields("Ana García", "12345678A", ""), &existing);
        assert_eq!(result.match_score, u32::MAX);
        assert!(result.is_duplicate);
    }

    #[test]
    fn test_match_field_names() {
        assert_eq!(MatchField::DocumentNumber.to_string(), "documentNumber");
        assert_eq!(MatchField::Name.to_string(), "name");
        assert_eq!(MatchField::BirthDate.to_string(), "birthDate");
    }
}
