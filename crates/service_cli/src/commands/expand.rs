//! Expand command implementation
//!
//! Writes one row per (input position, contract month).

use std::path::Path;

use adapter_loader::write_expanded_file;
use infra_config::AppConfig;
use tracing::info;

use super::{ensure_parent, expand_input};
use crate::Result;

/// Run the expand command
pub fn run(config: &AppConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output.expanded_path());

    info!("Expanding positions...");
    info!("  Input: {}", input.display());
    info!("  Output: {}", output.display());

    let expansion = expand_input(config, input)?;
    ensure_parent(&output)?;
    write_expanded_file(&output, &expansion.rows)?;

    info!(
        rows = expansion.rows.len(),
        ratio = expansion.audit.expansion_ratio(),
        "Expansion complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_reference_positions;

    #[test]
    fn test_expand_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_reference_positions(dir.path());
        let output = dir.path().join("nested").join("delta_positions.csv");

        run(&AppConfig::default(), &input, Some(&output)).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Qty,Tenor,Product,Mapped_Product,Strategy")
        );
        assert_eq!(lines.count(), 34);
    }
}
