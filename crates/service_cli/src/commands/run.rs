//! Run command implementation
//!
//! Expands, aggregates and writes the expanded table, the summary matrix
//! and the JSON audit into one output directory.

use std::path::Path;

use adapter_loader::{write_expanded_file, write_report_file, write_summary_file, RunReport};
use infra_config::AppConfig;
use tenor_risk::DeltaSummary;
use tracing::{info, warn};

use super::expand_input;
use crate::Result;

/// Run the full pipeline
pub fn run(config: &AppConfig, input: &Path, output_dir: Option<&Path>) -> Result<()> {
    let dir = output_dir.unwrap_or(&config.output.dir);

    info!("Running tenor expansion...");
    info!("  Input: {}", input.display());
    info!("  Output directory: {}", dir.display());

    let expansion = expand_input(config, input)?;
    let summary = DeltaSummary::from_rows_in_horizon(&expansion.rows, &config.tenor_mappings());

    std::fs::create_dir_all(dir)?;
    write_expanded_file(dir.join(&config.output.expanded_file), &expansion.rows)?;
    write_summary_file(dir.join(&config.output.summary_file), &summary)?;

    let report = RunReport::new(input.display().to_string(), &expansion.audit, &summary);
    write_report_file(dir.join(&config.output.audit_file), &report)?;

    if expansion.audit.has_soft_fallbacks() {
        warn!(
            unmapped_tenors = expansion.audit.unmapped_tenors.len(),
            unmapped_products = expansion.audit.unmapped_products.len(),
            "Run completed with soft fallbacks, see audit"
        );
    }

    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        tenors = summary.rows().len(),
        grand_total = report.grand_total,
        "Run complete"
    );
    Ok(())
}
