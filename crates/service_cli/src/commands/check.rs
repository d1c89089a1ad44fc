//! Check command implementation
//!
//! Reports the validated configuration and mapping table sizes.

use std::path::Path;

use infra_config::AppConfig;
use tenor_core::TenorKind;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    info!("Checking configuration...");

    print!("{}", describe(config, config_path));

    info!("Configuration check complete");
    Ok(())
}

fn describe(config: &AppConfig, config_path: &Path) -> String {
    let mappings = config.tenor_mappings();
    let products = config.product_map();
    let last_year = mappings.start_year() + u16::from(mappings.span_years()) - 1;
    let size = |kind| mappings.table(kind).map_or(0, |t| t.len());

    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, defaults)", config_path.display())
    };

    let mut out = String::new();
    out.push_str(&format!("Config:          {}\n", source));
    out.push_str(&format!("Log level:       {}\n", config.log_level));
    out.push_str(&format!(
        "Horizon:         {}..={} ({} years)\n",
        mappings.start_year(),
        last_year,
        mappings.span_years()
    ));
    out.push_str(&format!(
        "Quarterly codes: {}\n",
        size(TenorKind::Quarterly)
    ));
    out.push_str(&format!("Half codes:      {}\n", size(TenorKind::Half)));
    out.push_str(&format!(
        "Calendar codes:  {}\n",
        size(TenorKind::Calendar)
    ));
    out.push_str(&format!("Product aliases: {}\n", products.len()));
    out.push_str(&format!(
        "Strict tenors:   {}\n",
        config.expansion.strict_tenors
    ));
    out.push_str(&format!("Parallel:        {}\n", config.expansion.parallel));
    out.push_str(&format!(
        "Output:          {}\n",
        config.output.dir.display()
    ));
    out.push_str("Configuration OK\n");
    out
}
