//! LLM-backed extraction and category suggestion
//!
//! Timeouts are enforced here, at the collaborator boundary. The pipeline
//! itself never cancels anything.

use crate::config::IntakeConfig;
use crate::error::IntakeError;
use crate::parser::{parse_category_suggestion, parse_extracted_fields};
use crate::prompt::{extraction_prompt, CategoryPromptBuilder};
use async_trait::async_trait;
use dossier_domain::traits::{CategorySuggester, DocumentExtractor, LlmProvider};
use dossier_domain::{CategorySuggestion, DocumentInput, ExtractedFields};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Reads identity documents with a vision model
pub struct LlmDocumentExtractor<L: LlmProvider> {
    llm: Arc<L>,
    timeout: Duration,
}

impl<L: LlmProvider> LlmDocumentExtractor<L> {
    /// Create a new extractor
    pub fn new(llm: Arc<L>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// Create an extractor using the configured extraction timeout
    pub fn from_config(llm: Arc<L>, config: &IntakeConfig) -> Self {
        Self::new(llm, config.extraction_timeout())
    }
}

#[async_trait]
impl<L: LlmProvider> DocumentExtractor for LlmDocumentExtractor<L> {
    type Error = IntakeError;

    async fn extract(&self, document: &DocumentInput) -> Result<ExtractedFields, Self::Error> {
        let prompt = extraction_prompt(&document.mime_type);
        debug!("Extraction prompt length: {} chars", prompt.len());

        let response = timeout(self.timeout, self.llm.generate_with_image(&prompt, document))
            .await
            .map_err(|_| IntakeError::Timeout(self.timeout))?
            .map_err(|e| IntakeError::Llm(e.to_string()))?;

        debug!("Extraction response length: {} chars", response.len());
        parse_extracted_fields(&response)
    }
}

/// Suggests a case category with a text model
pub struct LlmCategorySuggester<L: LlmProvider> {
    llm: Arc<L>,
    timeout: Duration,
    categories: Vec<String>,
}

impl<L: LlmProvider> LlmCategorySuggester<L> {
    /// Create a new suggester with no category list
    pub fn new(llm: Arc<L>, timeout: Duration) -> Self {
        Self {
            llm,
            timeout,
            categories: Vec::new(),
        }
    }

    /// Create a suggester using the configured timeout and categories
    pub fn from_config(llm: Arc<L>, config: &IntakeConfig) -> Self {
        Self::new(llm, config.suggestion_timeout()).with_categories(config.categories.clone())
    }

    /// Offer these categories to the model
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }
}

#[async_trait]
impl<L: LlmProvider> CategorySuggester for LlmCategorySuggester<L> {
    type Error = IntakeError;

    async fn suggest(&self, fields: &ExtractedFields) -> Result<CategorySuggestion, Self::Error> {
        let prompt = CategoryPromptBuilder::new(fields)
            .with_categories(&self.categories)
            .build();

        let response = timeout(self.timeout, self.llm.generate(&prompt))
            .await
            .map_err(|_| IntakeError::Timeout(self.timeout))?
            .map_err(|e| IntakeError::Llm(e.to_string()))?;

        parse_category_suggestion(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::{DocumentType, Priority};
    use dossier_llm::{LlmError, MockProvider};

    /// Provider that never answers within any reasonable timeout
    struct SlowProvider;

    #[async_trait]
    impl LlmProvider for SlowProvider {
        type Error = LlmError;

        async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("{}".to_string())
        }

        async fn generate_with_image(
            &self,
            prompt: &str,
            _image: &DocumentInput,
        ) -> Result<String, Self::Error> {
            self.generate(prompt).await
        }
    }

    fn jpeg() -> DocumentInput {
        DocumentInput::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
    }

    #[tokio::test]
    async fn test_extractor_sends_image_and_parses() {
        let llm = Arc::new(MockProvider::new(
            r#"{ "fullName": "John Smith", "documentType": "passport", "confidence": 91 }"#,
        ));
        let extractor = LlmDocumentExtractor::new(Arc::clone(&llm), Duration::from_secs(5));

        let fields = extractor.extract(&jpeg()).await.unwrap();

        assert_eq!(fields.full_name, "John Smith");
        assert_eq!(fields.document_type, DocumentType::Passport);
        assert_eq!(llm.images_seen(), vec!["image/jpeg".to_string()]);
    }

    #[tokio::test]
    async fn test_extractor_maps_provider_error() {
        let llm = Arc::new(MockProvider::failing("connection refused"));
        let extractor = LlmDocumentExtractor::new(llm, Duration::from_secs(5));

        let result = extractor.extract(&jpeg()).await;
        assert!(matches!(result, Err(IntakeError::Llm(_))));
    }

    #[tokio::test]
    async fn test_extractor_rejects_prose() {
        let llm = Arc::new(MockProvider::new("The image is too blurry to read."));
        let extractor = LlmDocumentExtractor::new(llm, Duration::from_secs(5));

        let result = extractor.extract(&jpeg()).await;
        assert!(matches!(result, Err(IntakeError::InvalidFormat(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_extractor_times_out() {
        let extractor = LlmDocumentExtractor::new(Arc::new(SlowProvider), Duration::from_secs(1));

        let result = extractor.extract(&jpeg()).await;
        assert!(matches!(result, Err(IntakeError::Timeout(d)) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_suggester_parses_answer() {
        let llm = Arc::new(MockProvider::new(
            r#"{ "suggestedCategory": "residency", "reason": "NIE holder", "priority": "high" }"#,
        ));
        let suggester = LlmCategorySuggester::from_config(llm, &IntakeConfig::default());

        let suggestion = suggester.suggest(&ExtractedFields::default()).await.unwrap();
        assert_eq!(suggestion.suggested_category, "residency");
        assert_eq!(suggestion.priority, Priority::High);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggester_times_out() {
        let suggester = LlmCategorySuggester::new(Arc::new(SlowProvider), Duration::from_secs(2));

        let result = suggester.suggest(&ExtractedFields::default()).await;
        assert!(matches!(result, Err(IntakeError::Timeout(_))));
    }
}
