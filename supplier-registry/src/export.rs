//! Supplier exports
//!
//! Produces the dashboard's downloadable files:
//! - CSV export of the (filtered) supplier list
//! - Portfolio risk report with summary figures and a supplier table
//! - Single-supplier report with the compliance breakdown
//! - JSON export for API consumption
//!
//! Summary figures come from `esg_core::summarize`, so exported counts and
//! averages match the dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use esg_core::{summarize, ReportSummary, Supplier};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::config::ExportConfig;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No data to export: there are no suppliers matching the current filters")]
    NoData,
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Export format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,    // spreadsheet import
    Report, // printable risk report
    Json,   // API consumption
}

impl ExportFormat {
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Report => "text/plain",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Metadata of a written export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub export_id: Uuid,
    pub format: ExportFormat,
    pub mime_type: String,
    pub generated_at: DateTime<Utc>,
    pub file_path: PathBuf,
    pub file_size: u64,
    pub supplier_count: usize,
}

pub const CSV_HEADERS: [&str; 13] = [
    "Supplier Name",
    "Country",
    "Category",
    "ESG Score",
    "Risk Level",
    "Environmental Policy",
    "Carbon Emissions",
    "ISO 14001",
    "Labour Rights",
    "Health & Safety",
    "Anti-Corruption",
    "Created Date",
    "Updated Date",
];

fn yes_no(met: bool) -> &'static str {
    if met {
        "Yes"
    } else {
        "No"
    }
}

fn date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `<prefix>-<YYYY-MM-DD>.<ext>`
pub fn export_file_name(prefix: &str, day: NaiveDate, format: ExportFormat) -> String {
    format!("{}-{}.{}", prefix, day.format("%Y-%m-%d"), format.extension())
}

/// Lower-cased supplier name with whitespace runs replaced by `-`
pub fn supplier_report_file_name(name: &str) -> String {
    let slug = name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-esg-report.{}", slug.to_lowercase(), ExportFormat::Report.extension())
}

/// Render suppliers as CSV with every cell quoted
pub fn render_csv(suppliers: &[Supplier]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for s in suppliers {
        let flags = s.flags();
        let score = s.esg_score().to_string();
        let created = date(s.created_at());
        let updated = date(s.updated_at());
        writer.write_record([
            s.name(),
            s.country(),
            s.category(),
            score.as_str(),
            s.risk_level().as_str(),
            yes_no(flags.environmental_policy),
            yes_no(flags.carbon_emissions),
            yes_no(flags.iso14001),
            yes_no(flags.labour_rights),
            yes_no(flags.health_safety),
            yes_no(flags.anti_corruption),
            created.as_str(),
            updated.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Serialization(e.to_string()))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

/// Printable portfolio report: summary figures then one row per supplier
pub fn render_portfolio_report(suppliers: &[Supplier], generated_at: DateTime<Utc>) -> String {
    let summary = summarize(suppliers);
    let mut out = String::new();

    let _ = writeln!(out, "ESG Supplier Risk Report");
    let _ = writeln!(out, "Generated on {}", date(generated_at));
    let _ = writeln!(out);
    write_summary(&mut out, &summary);
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:<30} {:<16} {:<16} {:>9} {:>10}",
        "Supplier Name", "Country", "Category", "ESG Score", "Risk Level"
    );
    let _ = writeln!(out, "{}", "-".repeat(85));
    for s in suppliers {
        let _ = writeln!(
            out,
            "{:<30} {:<16} {:<16} {:>9} {:>10}",
            truncate(s.name(), 30),
            truncate(s.country(), 16),
            truncate(s.category(), 16),
            s.esg_score(),
            s.risk_level()
        );
    }

    out
}

fn write_summary(out: &mut String, summary: &ReportSummary) {
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "Total Suppliers: {}", summary.stats.total_suppliers);
    match summary.average_score {
        Some(avg) => {
            let _ = writeln!(out, "Average ESG Score: {}", avg);
        }
        None => {
            let _ = writeln!(out, "Average ESG Score: n/a");
        }
    }
    let _ = writeln!(
        out,
        "High Risk: {}  |  Medium Risk: {}  |  Low Risk: {}",
        summary.stats.high_risk, summary.stats.medium_risk, summary.stats.low_risk
    );
}

/// Printable report for one supplier, including its compliance breakdown
pub fn render_supplier_report(supplier: &Supplier, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "ESG Supplier Report");
    let _ = writeln!(out, "Generated on {}", date(generated_at));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", supplier.name());
    let _ = writeln!(out, "Country: {}", supplier.country());
    let _ = writeln!(out, "Category: {}", supplier.category());
    let _ = writeln!(out, "Last Updated: {}", date(supplier.updated_at()));
    let _ = writeln!(
        out,
        "ESG Score: {} ({})",
        supplier.esg_score(),
        supplier.risk_level().label()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "ESG Compliance Breakdown");
    let _ = writeln!(out, "{:<28} {:<16} {:>8}", "Criteria", "Status", "Points");
    for result in supplier.breakdown().criteria {
        let status = if result.met { "Compliant" } else { "Non-Compliant" };
        let _ = writeln!(
            out,
            "{:<28} {:<16} {:>8}",
            result.criterion.label(),
            status,
            format!("+{} pts", result.max_points)
        );
        let _ = writeln!(out, "  {}", result.criterion.description());
    }

    if !supplier.documents().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Uploaded Documents");
        let _ = writeln!(
            out,
            "{:<36} {:<6} {:>10} {:>12}",
            "Document Name", "Type", "Size", "Uploaded"
        );
        for doc in supplier.documents() {
            let _ = writeln!(
                out,
                "{:<36} {:<6} {:>10} {:>12}",
                truncate(&doc.name, 36),
                doc.kind.extension().to_uppercase(),
                doc.size,
                date(doc.uploaded_at)
            );
        }
    }

    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    generated_at: DateTime<Utc>,
    summary: ReportSummary,
    suppliers: &'a [Supplier],
}

pub fn render_json(suppliers: &[Supplier], generated_at: DateTime<Utc>) -> Result<String> {
    let export = JsonExport {
        generated_at,
        summary: summarize(suppliers),
        suppliers,
    };
    serde_json::to_string_pretty(&export).map_err(|e| ExportError::Serialization(e.to_string()))
}

/// Writes exports into the configured directory
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.output_dir)?;
        Ok(Self { config })
    }

    /// Export a supplier list. An empty list is refused.
    pub fn export(&self, format: ExportFormat, suppliers: &[Supplier]) -> Result<ExportMetadata> {
        if suppliers.is_empty() {
            return Err(ExportError::NoData);
        }

        let generated_at = Utc::now();
        let (prefix, content) = match format {
            ExportFormat::Csv => (&self.config.csv_prefix, render_csv(suppliers)?),
            ExportFormat::Report => (
                &self.config.report_prefix,
                render_portfolio_report(suppliers, generated_at),
            ),
            ExportFormat::Json => (&self.config.json_prefix, render_json(suppliers, generated_at)?),
        };

        let file_name = export_file_name(prefix, generated_at.date_naive(), format);
        let metadata = self.write(&file_name, format, &content, suppliers.len(), generated_at)?;
        info!(
            "Exported {} suppliers to {}",
            suppliers.len(),
            metadata.file_path.display()
        );
        Ok(metadata)
    }

    pub fn export_supplier_report(&self, supplier: &Supplier) -> Result<ExportMetadata> {
        let generated_at = Utc::now();
        let content = render_supplier_report(supplier, generated_at);
        let file_name = supplier_report_file_name(supplier.name());
        let metadata = self.write(&file_name, ExportFormat::Report, &content, 1, generated_at)?;
        info!("Generated report for {}", supplier.name());
        Ok(metadata)
    }

    fn write(
        &self,
        file_name: &str,
        format: ExportFormat,
        content: &str,
        supplier_count: usize,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportMetadata> {
        let file_path = self.config.output_dir.join(file_name);
        std::fs::write(&file_path, content.as_bytes())?;

        Ok(ExportMetadata {
            export_id: Uuid::new_v4(),
            format,
            mime_type: format.mime_type().to_string(),
            generated_at,
            file_path,
            file_size: content.len() as u64,
            supplier_count,
        })
    }
}
