//! Inspect command implementation
//!
//! Shows how individual tenors classify, normalise and expand.

use infra_config::AppConfig;
use tenor_core::{normalize, Tenor, TenorError, TenorMappings};
use tenor_risk::TenorExpander;

use crate::{CliError, Result};

/// Run the inspect command
pub fn run(config: &AppConfig, tenors: &[String], qty: f64) -> Result<()> {
    if !qty.is_finite() {
        return Err(CliError::invalid_argument(format!(
            "--qty must be finite, got {}",
            qty
        )));
    }
    if tenors.iter().any(|t| t.trim().is_empty()) {
        return Err(CliError::invalid_argument("tenor codes must not be blank"));
    }

    let mappings = config.tenor_mappings();

    for raw in tenors {
        print!("{}", describe(&mappings, raw, qty)?);
    }
    Ok(())
}

fn describe_leg(expander: &TenorExpander<'_>, tenor: &Tenor) -> String {
    let structure = expander.expand_structure(tenor);
    let mut line = format!("{} [{}]", tenor, tenor.kind());

    if tenor.kind().is_compound() {
        line.push_str(&format!(" key {}", normalize(&tenor.to_string())));
    }
    line.push_str(&format!(" -> {}", structure.months.join(" ")));
    if structure.unmapped.is_some() {
        line.push_str(" (unmapped, literal)");
    }
    line
}

fn describe(mappings: &TenorMappings, raw: &str, qty: f64) -> std::result::Result<String, TenorError> {
    let tenor = Tenor::parse(raw)?;
    let expander = TenorExpander::new(mappings);
    let expansion = expander.expand(&tenor, qty);

    let mut out = format!("{} ({})\n", raw, tenor.kind());
    match tenor.legs() {
        Some((leg1, leg2)) => {
            out.push_str(&format!("  leg 1: {}\n", describe_leg(&expander, leg1)));
            out.push_str(&format!("  leg 2: {}\n", describe_leg(&expander, leg2)));
        }
        None => out.push_str(&format!("  {}\n", describe_leg(&expander, &tenor))),
    }

    let deltas: Vec<String> = expansion
        .deltas
        .iter()
        .map(|d| format!("{} {}", d.qty, d.tenor))
        .collect();
    out.push_str(&format!("  deltas: {}\n", deltas.join(", ")));
    out.push_str(&format!("  net: {}\n", expansion.net()));
    Ok(out)
}
