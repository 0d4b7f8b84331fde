//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use dossier_intake::{CategoryOutcome, ReconciliationResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// Edit distance and similarity between two strings.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    /// First string
    pub a: String,
    /// Second string
    pub b: String,
    /// Edit distance, case-sensitive
    pub distance: usize,
    /// Similarity, case-sensitive
    pub similarity: f64,
    /// Similarity after name normalization
    pub name_similarity: f64,
    /// Whether the names would earn the name bonus
    pub name_match: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a reconciliation result.
    pub fn format_result(&self, result: &ReconciliationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(result.record.id.to_string()),
        }
    }

    fn format_result_table(&self, result: &ReconciliationResult) -> String {
        let record = &result.record;

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["ID", &record.id.to_string()]);
        builder.push_record(["Name", &record.name]);
        builder.push_record(["Document", &record.document_number]);
        builder.push_record(["Type", &record.document_type]);
        builder.push_record(["Birthday", &record.key_dates.birthday]);
        builder.push_record(["Nationality", &record.nationality]);
        builder.push_record(["Category", &category_label(result)]);
        builder.push_record(["Priority", record.priority.as_str()]);
        builder.push_record(["Confidence", &result.confidence.to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![table.to_string()];

        let duplicate = &result.duplicate;
        match &duplicate.best_match {
            Some(best) if duplicate.is_duplicate => {
                lines.push(self.error(&format!(
                    "Probable duplicate of {} ({}), score {}, matched on {}",
                    best.full_name,
                    best.id,
                    duplicate.match_score,
                    join_fields(result)
                )));
            }
            Some(best) => {
                lines.push(self.info(&format!(
                    "Closest existing record: {} ({}), score {}",
                    best.full_name, best.id, duplicate.match_score
                )));
            }
            None => lines.push(self.success("No similar record in the registry")),
        }

        for warning in result.warnings() {
            lines.push(self.warning(&warning));
        }

        lines.join("\n")
    }

    /// Format a similarity report.
    pub fn format_similarity(&self, report: &SimilarityReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.4}", report.name_similarity)),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Measure", "Value"]);
                builder.push_record(["Distance", &report.distance.to_string()]);
                builder.push_record(["Similarity", &format!("{:.4}", report.similarity)]);
                builder.push_record([
                    "Name similarity",
                    &format!("{:.4}", report.name_similarity),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let verdict = if report.name_match {
                    self.success("Names match")
                } else {
                    self.info("Names do not match")
                };
                Ok(format!("{}\n{}", table, verdict))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn category_label(result: &ReconciliationResult) -> String {
    match &result.category {
        CategoryOutcome::Suggested { .. } => result.record.category.clone(),
        CategoryOutcome::Fallback { .. } => format!("{} (default)", result.record.category),
    }
}

fn join_fields(result: &ReconciliationResult) -> String {
    result
        .duplicate
        .matching_fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
