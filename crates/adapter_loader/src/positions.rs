//! Position CSV reader.
//!
//! Expects a header row with at least `Qty,Tenor,Product,Strategy`; other
//! columns are ignored. Fields are trimmed of surrounding whitespace here so
//! the core sees clean codes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tenor_risk::Position;
use tracing::{debug, info};

use crate::error::LoaderError;

/// Reads positions from any CSV source.
pub fn read_positions<R: Read>(reader: R) -> Result<Vec<Position>, LoaderError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut positions = Vec::new();

    for (i, result) in csv_reader.deserialize::<Position>().enumerate() {
        // header occupies line 1
        let line = i + 2;
        let position = result?;

        if !position.qty.is_finite() {
            return Err(LoaderError::invalid_record(
                line,
                format!("Qty must be finite, got {}", position.qty),
            ));
        }
        if position.tenor.is_empty() {
            return Err(LoaderError::invalid_record(line, "empty Tenor"));
        }

        debug!(line, tenor = %position.tenor, qty = position.qty, "Read position");
        positions.push(position);
    }

    Ok(positions)
}

/// Reads positions from a CSV file.
pub fn load_positions(path: impl AsRef<Path>) -> Result<Vec<Position>, LoaderError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LoaderError::io(path, e))?;
    let positions = read_positions(file)?;

    info!(
        path = %path.display(),
        rows = positions.len(),
        "Positions loaded"
    );

    Ok(positions)
}
