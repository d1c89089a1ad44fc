//! Output writers for expanded positions, the summary matrix and the run audit.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tenor_risk::{DeltaSummary, ExpandedDelta, ExpansionAudit, UnmappedTenorRecord};
use tracing::info;

use crate::error::LoaderError;

/// Per-product column total in the run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTotal {
    /// Summary column.
    pub product: String,
    /// Sum of the column.
    pub total: f64,
}

/// JSON audit written alongside the output tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    /// Input file the run read.
    pub input_file: String,
    /// Input rows processed.
    pub input_rows: usize,
    /// Expanded rows emitted.
    pub output_rows: usize,
    /// Expanded rows per input row.
    pub expansion_ratio: f64,
    /// Input rows per tenor kind.
    pub rows_by_kind: BTreeMap<String, usize>,
    /// Compound tenors that fell back to literal months.
    pub unmapped_tenors: Vec<UnmappedTenorRecord>,
    /// Product labels passed through unchanged, with row counts.
    pub unmapped_products: BTreeMap<String, usize>,
    /// Summary column totals in column order.
    pub column_totals: Vec<ColumnTotal>,
    /// Sum over the whole summary matrix.
    pub grand_total: f64,
}

impl RunReport {
    /// Builds a report stamped with the current time.
    pub fn new(input_file: impl Into<String>, audit: &ExpansionAudit, summary: &DeltaSummary) -> Self {
        let column_totals = summary
            .products()
            .iter()
            .map(|product| ColumnTotal {
                product: product.clone(),
                total: summary.column_total(product).unwrap_or(0.0),
            })
            .collect();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            input_file: input_file.into(),
            input_rows: audit.input_rows,
            output_rows: audit.output_rows,
            expansion_ratio: audit.expansion_ratio(),
            rows_by_kind: audit.rows_by_kind.clone(),
            unmapped_tenors: audit.unmapped_tenors.clone(),
            unmapped_products: audit.unmapped_products.clone(),
            column_totals,
            grand_total: summary.grand_total(),
        }
    }
}

/// Writes the expanded table with header `Qty,Tenor,Product,Mapped_Product,Strategy`.
pub fn write_expanded<W: Write>(writer: W, rows: &[ExpandedDelta]) -> Result<(), LoaderError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(["Qty", "Tenor", "Product", "Mapped_Product", "Strategy"])?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the summary matrix with header `Tenor,<products...>`.
pub fn write_summary<W: Write>(writer: W, summary: &DeltaSummary) -> Result<(), LoaderError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Tenor".to_string()];
    header.extend(summary.products().iter().cloned());
    csv_writer.write_record(&header)?;

    for row in summary.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.tenor.clone());
        record.extend(row.values.iter().map(|v| v.to_string()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the run report as pretty-printed JSON.
pub fn write_report<W: Write>(mut writer: W, report: &RunReport) -> Result<(), LoaderError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, LoaderError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| LoaderError::io(path, e))
}

/// Writes the expanded table to `path`.
pub fn write_expanded_file(path: impl AsRef<Path>, rows: &[ExpandedDelta]) -> Result<(), LoaderError> {
    let path = path.as_ref();
    write_expanded(create(path)?, rows)?;
    info!(path = %path.display(), rows = rows.len(), "Expanded positions written to file");
    Ok(())
}

/// Writes the summary matrix to `path`.
pub fn write_summary_file(path: impl AsRef<Path>, summary: &DeltaSummary) -> Result<(), LoaderError> {
    let path = path.as_ref();
    write_summary(create(path)?, summary)?;
    info!(
        path = %path.display(),
        tenors = summary.rows().len(),
        products = summary.products().len(),
        "Delta summary written to file"
    );
    Ok(())
}

/// Writes the run report to `path`.
pub fn write_report_file(path: impl AsRef<Path>, report: &RunReport) -> Result<(), LoaderError> {
    let path = path.as_ref();
    write_report(create(path)?, report)?;
    info!(path = %path.display(), "Expansion audit written to file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenor_risk::{Position, PositionExpander};

    fn expanded() -> Vec<ExpandedDelta> {
        PositionExpander::default()
            .expand(&[
                Position::new(-120.0, "J6/Q2-26", "WDF", "Freight"),
                Position::new(5.0, "H6", "HTT", "Front"),
            ])
            .unwrap()
            .rows
    }

    #[test]
    fn test_write_expanded_header_and_rows() {
        let mut buf = Vec::new();
        write_expanded(&mut buf, &expanded()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Qty,Tenor,Product,Mapped_Product,Strategy");
        assert_eq!(lines[1], "-120.0,J6,WDF,WDF,Freight");
        assert_eq!(lines[2], "40.0,J6,WDF,WDF,Freight");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_write_expanded_empty_keeps_header() {
        let mut buf = Vec::new();
        write_expanded(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            "Qty,Tenor,Product,Mapped_Product,Strategy"
        );
    }

    #[test]
    fn test_write_summary_matrix() {
        let summary = DeltaSummary::from_rows(&expanded());
        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Tenor,HTT,WDF");
        assert_eq!(lines[1], "H6,5,0");
        assert_eq!(lines[2], "J6,0,-80");
        assert_eq!(lines[3], "K6,0,40");
        assert_eq!(lines[4], "M6,0,40");
    }

    #[test]
    fn test_report_totals_follow_columns() {
        let output = PositionExpander::default()
            .expand(&[
                Position::new(5.0, "H6", "HTT", "Front"),
                Position::new(2.0, "Cal31", "Brent", "Macro"),
            ])
            .unwrap();
        let summary = DeltaSummary::from_rows(&output.rows);
        let report = RunReport::new("pos.csv", &output.audit, &summary);

        assert_eq!(report.input_rows, 2);
        assert_eq!(report.output_rows, 2);
        assert_eq!(report.column_totals[0].product, "HTT");
        assert_eq!(report.column_totals[1].product, "Brent");
        assert_eq!(report.grand_total, 7.0);
        assert_eq!(report.unmapped_tenors[0].normalized, "Cal31");
        assert_eq!(report.unmapped_products["Brent"], 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }
}
