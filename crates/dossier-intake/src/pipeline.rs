//! Reconciliation pipeline
//!
//! ```text
//! Document → Extractor → Validate → Score → Match → Suggest → Map → Result
//! ```

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::mapper::RecordMapper;
use crate::types::{CategoryOutcome, PipelineStage, ReconciliationResult};
use chrono::{Local, NaiveDate};
use dossier_domain::traits::{CategorySuggester, DocumentExtractor};
use dossier_domain::{DocumentInput, ExistingRecord, ExtractedFields};
use dossier_gatekeeper::{ConfidenceScorer, FieldValidator};
use dossier_matcher::{DuplicateMatcher, MatchResult};
use tracing::{debug, info, warn};

/// Turns one identity document into a reviewed, deduplicated canonical record
///
/// The pipeline holds no per-document state, so one instance can serve any
/// number of concurrent reconciliations.
pub struct ReconciliationPipeline<X, C>
where
    X: DocumentExtractor,
    C: CategorySuggester,
{
    extractor: X,
    suggester: C,
    validator: FieldValidator,
    scorer: ConfidenceScorer,
    matcher: DuplicateMatcher,
    mapper: RecordMapper,
    config: IntakeConfig,
}

impl<X, C> ReconciliationPipeline<X, C>
where
    X: DocumentExtractor,
    C: CategorySuggester,
{
    /// Create a new pipeline
    pub fn new(extractor: X, suggester: C, config: IntakeConfig) -> Result<Self, IntakeError> {
        config.validate()?;

        Ok(Self {
            extractor,
            suggester,
            validator: FieldValidator::new(config.validation.clone())?,
            scorer: ConfidenceScorer::new(config.scoring.clone())?,
            matcher: DuplicateMatcher::new(config.matching.clone())?,
            mapper: RecordMapper::new(config.default_category.clone()),
            config,
        })
    }

    /// Get the active configuration
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Reconcile a document against a registry snapshot, dated today
    pub async fn reconcile(
        &self,
        document: &DocumentInput,
        existing: &[ExistingRecord],
    ) -> Result<ReconciliationResult, IntakeError> {
        self.reconcile_on(document, existing, Local::now().date_naive())
            .await
    }

    /// Reconcile a document against a registry snapshot
    ///
    /// `processed_on` is both the reference date for age checks and the
    /// record's first-contact date. Fails only when the document cannot be
    /// turned into fields.
    pub async fn reconcile_on(
        &self,
        document: &DocumentInput,
        existing: &[ExistingRecord],
        processed_on: NaiveDate,
    ) -> Result<ReconciliationResult, IntakeError> {
        info!(
            "Starting reconciliation: {} byte {} document, {} existing records",
            document.len(),
            document.mime_type,
            existing.len()
        );

        let fields = match self.extract(document).await {
            Ok(fields) => fields,
            Err(e) => {
                transition(PipelineStage::Received, PipelineStage::Failed);
                warn!("Reconciliation failed: {}", e);
                return Err(e);
            }
        };

        Ok(self.run(fields, existing, processed_on).await)
    }

    /// Reconcile fields that were already extracted, dated today
    pub async fn reconcile_fields(
        &self,
        fields: ExtractedFields,
        existing: &[ExistingRecord],
    ) -> ReconciliationResult {
        self.reconcile_fields_on(fields, existing, Local::now().date_naive())
            .await
    }

    /// Reconcile fields that were already extracted
    ///
    /// Skips the extraction boundary, so this cannot fail.
    pub async fn reconcile_fields_on(
        &self,
        fields: ExtractedFields,
        existing: &[ExistingRecord],
        processed_on: NaiveDate,
    ) -> ReconciliationResult {
        info!(
            "Starting reconciliation of supplied fields, {} existing records",
            existing.len()
        );
        self.run(fields, existing, processed_on).await
    }

    /// Intake guards, then the extraction collaborator
    async fn extract(&self, document: &DocumentInput) -> Result<ExtractedFields, IntakeError> {
        if document.is_empty() {
            return Err(IntakeError::EmptyDocument);
        }
        if document.len() > self.config.max_document_bytes {
            return Err(IntakeError::DocumentTooLarge(
                document.len(),
                self.config.max_document_bytes,
            ));
        }
        if !self.config.accepts(&document.mime_type) {
            return Err(IntakeError::UnsupportedMimeType(document.mime_type.clone()));
        }

        self.extractor
            .extract(document)
            .await
            .map_err(|e| IntakeError::Extraction(e.to_string()))
    }

    async fn run(
        &self,
        fields: ExtractedFields,
        existing: &[ExistingRecord],
        processed_on: NaiveDate,
    ) -> ReconciliationResult {
        let stage = advance(PipelineStage::Received);

        let validation = self.validator.validate(&fields, processed_on);
        if validation.has_warnings() {
            debug!("Validation warnings: {:?}", validation.messages());
        }
        let stage = advance(stage);

        let confidence = self.scorer.score(&fields);
        debug!("Confidence score: {}", confidence);
        let stage = advance(stage);

        let duplicate = self.find_duplicate(&fields, existing).await;
        let stage = advance(stage);

        let category = self.suggest_category(&fields).await;
        let record = match &category {
            CategoryOutcome::Suggested { suggestion } => {
                let mut record = self.mapper.to_canonical(
                    &fields,
                    Some(&suggestion.suggested_category),
                    processed_on,
                );
                record.priority = suggestion.priority;
                record
            }
            CategoryOutcome::Fallback { .. } => {
                self.mapper.to_canonical(&fields, None, processed_on)
            }
        };
        let stage = advance(stage);

        info!(
            "Reconciliation complete: {} warnings, confidence {}, duplicate: {}",
            validation.warnings.len(),
            confidence,
            duplicate.is_duplicate
        );

        ReconciliationResult {
            record,
            fields,
            validation,
            confidence,
            duplicate,
            category,
            stage: advance(stage),
        }
    }

    /// Large registries are scanned by rayon on a blocking thread
    async fn find_duplicate(
        &self,
        fields: &ExtractedFields,
        existing: &[ExistingRecord],
    ) -> MatchResult {
        if existing.len() < self.config.parallel_match_threshold {
            return self.matcher.find_duplicate(fields, existing);
        }

        debug!("Scanning {} records in parallel", existing.len());
        let matcher = self.matcher.clone();
        let query = fields.clone();
        let registry = existing.to_vec();

        match tokio::task::spawn_blocking(move || {
            matcher.find_duplicate_parallel(&query, &registry)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!("Parallel scan failed, scanning sequentially: {}", e);
                self.matcher.find_duplicate(fields, existing)
            }
        }
    }

    /// Never fails: any collaborator error becomes a fallback
    async fn suggest_category(&self, fields: &ExtractedFields) -> CategoryOutcome {
        match self.suggester.suggest(fields).await {
            Ok(suggestion) if !suggestion.suggested_category.trim().is_empty() => {
                debug!(
                    "Category suggestion: {} ({})",
                    suggestion.suggested_category, suggestion.priority
                );
                CategoryOutcome::Suggested { suggestion }
            }
            Ok(_) => {
                warn!(
                    "Category suggestion was blank, using '{}'",
                    self.mapper.default_category()
                );
                CategoryOutcome::Fallback {
                    reason: "blank suggestion".to_string(),
                }
            }
            Err(e) => {
                warn!(
                    "Category suggestion failed, using '{}': {}",
                    self.mapper.default_category(),
                    e
                );
                CategoryOutcome::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Move to the next stage on the success path
fn advance(stage: PipelineStage) -> PipelineStage {
    match stage.next() {
        Some(next) => {
            transition(stage, next);
            next
        }
        None => stage,
    }
}

fn transition(from: PipelineStage, to: PipelineStage) {
    debug!("Pipeline stage {} -> {}", from, to);
}
