//! Reconcile command implementation.

use crate::cli::ReconcileArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::{guess_mime_type, load_registry};
use crate::output::Formatter;
use dossier_domain::DocumentInput;
use dossier_intake::{LlmCategorySuggester, LlmDocumentExtractor, ReconciliationPipeline};
use std::fs;
use std::sync::Arc;
use tracing::info;

/// Execute the reconcile command.
pub async fn execute_reconcile(
    args: ReconcileArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let mime_type = match args.mime {
        Some(mime_type) => mime_type,
        None => guess_mime_type(&args.document)?,
    };
    let document = DocumentInput::new(fs::read(&args.document)?, mime_type);
    let registry = load_registry(args.registry.as_deref())?;

    info!(
        "Using model '{}' at {}",
        config.provider.model, config.provider.endpoint
    );
    let llm = Arc::new(config.provider.build());
    let pipeline = ReconciliationPipeline::new(
        LlmDocumentExtractor::from_config(Arc::clone(&llm), &config.intake),
        LlmCategorySuggester::from_config(llm, &config.intake),
        config.intake.clone(),
    )?;

    let result = pipeline.reconcile(&document, &registry).await?;
    println!("{}", formatter.format_result(&result)?);

    Ok(())
}
