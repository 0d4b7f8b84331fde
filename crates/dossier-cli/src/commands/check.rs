//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{load_fields, load_registry};
use crate::output::Formatter;
use async_trait::async_trait;
use dossier_domain::traits::{CategorySuggester, DocumentExtractor};
use dossier_domain::{CategorySuggestion, DocumentInput, ExistingRecord, ExtractedFields};
use dossier_intake::{
    IntakeConfig, LlmCategorySuggester, ReconciliationPipeline, ReconciliationResult,
};
use std::sync::Arc;

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let fields = load_fields(&args.fields)?;
    let registry = load_registry(args.registry.as_deref())?;

    let result = if args.offline {
        check(fields, &registry, Offline, &config.intake).await?
    } else {
        let llm = Arc::new(config.provider.build());
        let suggester = LlmCategorySuggester::from_config(llm, &config.intake);
        check(fields, &registry, suggester, &config.intake).await?
    };

    println!("{}", formatter.format_result(&result)?);
    Ok(())
}

/// Reconcile supplied fields with the given category suggester.
pub async fn check<C: CategorySuggester>(
    fields: ExtractedFields,
    registry: &[ExistingRecord],
    suggester: C,
    config: &IntakeConfig,
) -> Result<ReconciliationResult> {
    let pipeline = ReconciliationPipeline::new(FieldsSupplied, suggester, config.clone())?;
    Ok(pipeline.reconcile_fields(fields, registry).await)
}

/// Stands in for the extractor when fields come from a file
struct FieldsSupplied;

#[async_trait]
impl DocumentExtractor for FieldsSupplied {
    type Error = &'static str;

    async fn extract(
        &self,
        _document: &DocumentInput,
    ) -> std::result::Result<ExtractedFields, Self::Error> {
        Err("fields were supplied directly")
    }
}

/// Suggester used with --offline
pub struct Offline;

#[async_trait]
impl CategorySuggester for Offline {
    type Error = &'static str;

    async fn suggest(
        &self,
        _fields: &ExtractedFields,
    ) -> std::result::Result<CategorySuggestion, Self::Error> {
        Err("category suggestion disabled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_domain::{ClientId, Priority};
    use dossier_intake::CategoryOutcome;

    #[tokio::test]
    async fn test_offline_check_uses_default_category() {
        let fields = ExtractedFields {
            full_name: "John Smith".to_string(),
            document_number: "X1234567L".to_string(),
            ..Default::default()
        };
        let registry = vec![
            ExistingRecord::new(ClientId::from_value(1), "J. Smith")
                .with_document_number("X1234567L"),
        ];

        let result = check(fields, &registry, Offline, &IntakeConfig::default())
            .await
            .unwrap();

        assert!(result.duplicate.is_duplicate);
        assert_eq!(result.record.category, "general inquiry");
        assert_eq!(result.record.priority, Priority::Medium);
        assert_eq!(
            result.category,
            CategoryOutcome::Fallback {
                reason: "category suggestion disabled".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_check_rejects_invalid_config() {
        let config = IntakeConfig {
            default_category: String::new(),
            ..Default::default()
        };
        let result = check(ExtractedFields::default(), &[], Offline, &config).await;
        assert!(result.is_err());
    }
}
