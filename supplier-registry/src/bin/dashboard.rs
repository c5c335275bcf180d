//! ESG dashboard command-line driver
//!
//! Usage: esg-dashboard [SEARCH] [RISK]

use anyhow::Context;
use chrono::Utc;
use esg_core::RiskLevel;
use supplier_registry::mock_data::mock_suppliers;
use supplier_registry::{Config, ExportFormat, Exporter, SupplierFilter, SupplierRegistry};

fn load_config() -> anyhow::Result<Config> {
    match std::env::var("ESG_CONFIG") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("loading {}", path)),
        Err(_) => Config::from_env().context("loading config from environment"),
    }
}

fn parse_filter(args: &[String]) -> anyhow::Result<SupplierFilter> {
    let mut filter = SupplierFilter::new();
    if let Some(search) = args.first() {
        filter = filter.search(search.as_str());
    }
    if let Some(risk) = args.get(1) {
        let level: RiskLevel = risk.parse()?;
        filter = filter.risk(level);
    }
    Ok(filter)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config()?;
    tracing::info!("Starting {} v{}", config.service_name, config.service_version);

    let registry = if config.seed_mock_data {
        SupplierRegistry::with_suppliers(mock_suppliers(Utc::now()))
    } else {
        SupplierRegistry::new()
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let filter = parse_filter(&args)?;

    let stats = registry.stats();
    println!("ESG Supplier Risk Dashboard");
    println!(
        "Total: {}  Low: {}  Medium: {}  High: {}",
        stats.total_suppliers, stats.low_risk, stats.medium_risk, stats.high_risk
    );

    let visible = registry.filtered(&filter);
    println!("\nShowing {} of {} suppliers", visible.len(), registry.len());
    for supplier in &visible {
        println!(
            "  {:<30} {:<16} {:>3}  {}",
            supplier.name(),
            supplier.country(),
            supplier.esg_score(),
            supplier.risk_level().label()
        );
    }

    if visible.is_empty() {
        tracing::warn!("No suppliers match the current filters; skipping export");
        return Ok(());
    }

    let exporter = Exporter::new(config.export.clone())?;
    for format in [ExportFormat::Csv, ExportFormat::Report] {
        let metadata = exporter.export(format, &visible)?;
        println!("Wrote {}", metadata.file_path.display());
    }

    Ok(())
}
