//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use std::path::Path;

use adapter_loader::load_positions;
use infra_config::AppConfig;
use tenor_risk::{ExpansionOutput, PositionExpander};
use tracing::info;

use crate::{CliError, Result};

pub mod check;
pub mod expand;
pub mod inspect;
pub mod run;
pub mod summary;

/// Expander configured from `config`
pub(crate) fn expander(config: &AppConfig) -> PositionExpander {
    PositionExpander::new(config.tenor_mappings(), config.product_map())
        .with_strict(config.expansion.strict_tenors)
}

/// Loads `input` and expands every position
pub(crate) fn expand_input(config: &AppConfig, input: &Path) -> Result<ExpansionOutput> {
    if !input.exists() {
        return Err(CliError::file_not_found(input.display().to_string()));
    }

    let positions = load_positions(input)?;
    let expander = expander(config);

    info!(
        rows = positions.len(),
        parallel = config.expansion.parallel,
        strict = config.expansion.strict_tenors,
        "Expanding positions"
    );

    let output = if config.expansion.parallel {
        expander.expand_par(&positions)?
    } else {
        expander.expand(&positions)?
    };

    Ok(output)
}

/// Creates the parent directory of `path` if needed
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
