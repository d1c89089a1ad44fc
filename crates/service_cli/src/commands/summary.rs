//! Summary command implementation
//!
//! Pivots expanded deltas into the tenor × product matrix.

use std::path::Path;

use adapter_loader::{write_summary, write_summary_file};
use clap::ValueEnum;
use infra_config::AppConfig;
use tenor_risk::DeltaSummary;
use tracing::info;

use super::{ensure_parent, expand_input};
use crate::Result;

/// Stdout rendering of the summary matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Aligned table, 2 decimals, zero cells blank, with totals
    Table,
    /// Raw CSV
    Csv,
}

/// Run the summary command
pub fn run(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    format: SummaryFormat,
) -> Result<()> {
    info!("Building delta summary...");
    info!("  Input: {}", input.display());

    let expansion = expand_input(config, input)?;
    let summary = DeltaSummary::from_rows_in_horizon(&expansion.rows, &config.tenor_mappings());

    match output {
        Some(path) => {
            ensure_parent(path)?;
            write_summary_file(path, &summary)?;
        }
        None => match format {
            SummaryFormat::Table => print!("{}", render_table(&summary)),
            SummaryFormat::Csv => write_summary(std::io::stdout().lock(), &summary)?,
        },
    }

    Ok(())
}

fn format_cell(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        String::new()
    } else {
        format!("{:.2}", rounded)
    }
}

/// Renders the matrix as an aligned text table with column and grand totals
pub fn render_table(summary: &DeltaSummary) -> String {
    let mut header = vec!["Tenor".to_string()];
    header.extend(summary.products().iter().cloned());

    let body: Vec<Vec<String>> = summary
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.tenor.clone())
                .chain(row.values.iter().map(|v| format_cell(*v)))
                .collect()
        })
        .collect();

    let totals: Vec<String> = std::iter::once("Total".to_string())
        .chain(
            summary
                .products()
                .iter()
                .map(|p| format_cell(summary.column_total(p).unwrap_or(0.0))),
        )
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(body.iter())
                .chain(std::iter::once(&totals))
                .map(|line| line[col].len())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_line = |cells: &[String]| -> String {
        let mut line = format!("{:<width$}", cells[0], width = widths[0]);
        for (cell, width) in cells.iter().zip(&widths).skip(1) {
            line.push_str(&format!("  {:>width$}", cell, width = *width));
        }
        line.trim_end().to_string()
    };

    let separator_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let separator = "-".repeat(separator_width);

    let mut out = String::new();
    out.push_str(&render_line(&header[..]));
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');
    for row in &body {
        out.push_str(&render_line(row.as_slice()));
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&render_line(&totals[..]));
    out.push('\n');
    out.push_str(&format!(
        "Grand total: {:.2}\n",
        (summary.grand_total() * 100.0).round() / 100.0 + 0.0
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::write_reference_positions;
    use tenor_risk::{Position, PositionExpander};

    fn summary_of(positions: &[Position]) -> DeltaSummary {
        let output = PositionExpander::default().expand(positions).unwrap();
        DeltaSummary::from_rows(&output.rows)
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(0.0), "");
        assert_eq!(format_cell(0.004), "");
        assert_eq!(format_cell(-0.004), "");
        assert_eq!(format_cell(40.0), "40.00");
        assert_eq!(format_cell(-1400.0), "-1400.00");
        assert_eq!(format_cell(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_render_table_layout() {
        let summary = summary_of(&[
            Position::new(-120.0, "J6/Q2-26", "WDF", "Freight"),
            Position::new(5.0, "H6", "HTT", "Front"),
        ]);
        let table = render_table(&summary);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Tenor   HTT     WDF");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "H6     5.00");
        assert_eq!(lines[3], "J6           -80.00");
        assert_eq!(lines[6], lines[1]);
        assert_eq!(lines[7], "Total  5.00");
        assert_eq!(lines[8], "Grand total: 5.00");
    }

    #[test]
    fn test_render_empty_summary() {
        let table = render_table(&DeltaSummary::default());
        assert!(table.starts_with("Tenor\n"));
        assert!(table.ends_with("Grand total: 0.00\n"));
    }

    #[test]
    fn test_summary_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_reference_positions(dir.path());
        let output = dir.path().join("delta_summary.csv");

        run(
            &AppConfig::default(),
            &input,
            Some(&output),
            SummaryFormat::Table,
        )
        .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Tenor,HTT,CLBR,WDF,LH\n"));
        assert_eq!(content.lines().count(), 23);
    }

    #[test]
    fn test_summary_orders_rows_across_configured_decade() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pos.csv");
        std::fs::write(&input, "Qty,Tenor,Product,Strategy\n5,Z9,HTT,A\n1,Q1-2030,HTT,B\n")
            .unwrap();
        let output = dir.path().join("delta_summary.csv");

        let mut config = AppConfig::default();
        config.horizon.start_year = 2028;
        config.horizon.span_years = 3;
        run(&config, &input, Some(&output), SummaryFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let tenors: Vec<&str> = content
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(tenors, vec!["Z9", "F0", "G0", "H0"]);
    }
}
