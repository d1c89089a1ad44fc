//! # infra_config: tenorx Configuration
//!
//! Loads `tenorx.toml`, applies `TENORX_*` environment overrides and
//! validates the result. A missing file yields defaults that reproduce the
//! reference run (2026 horizon over three years, fixed product table).
//!
//! ```toml
//! log_level = "info"
//!
//! [horizon]
//! start_year = 2026
//! span_years = 3
//!
//! [expansion]
//! strict_tenors = false
//! parallel = false
//!
//! [products]
//! "HTT_Rolls" = "HTT"
//!
//! [output]
//! dir = "output"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tenor_core::{
    is_canonical, ProductMap, TenorMappings, CANONICAL_PRODUCTS, DEFAULT_SPAN_YEARS,
    DEFAULT_START_YEAR,
};
use thiserror::Error;
use tracing::{debug, warn};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tenorx.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Years covered by the mapping tables
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HorizonConfig {
    /// First calendar year
    pub start_year: u16,
    /// Number of years
    pub span_years: u8,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            span_years: DEFAULT_SPAN_YEARS,
        }
    }
}

/// Expansion behaviour
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Fail the run on an unmapped compound tenor
    pub strict_tenors: bool,
    /// Expand rows with rayon
    pub parallel: bool,
}

/// Output locations
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory
    pub dir: PathBuf,
    /// Expanded positions file name
    pub expanded_file: String,
    /// Summary matrix file name
    pub summary_file: String,
    /// JSON audit file name
    pub audit_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            expanded_file: "delta_positions.csv".to_string(),
            summary_file: "delta_summary.csv".to_string(),
            audit_file: "expansion_audit.json".to_string(),
        }
    }
}

impl OutputConfig {
    /// Full path of the expanded positions file
    pub fn expanded_path(&self) -> PathBuf {
        self.dir.join(&self.expanded_file)
    }

    /// Full path of the summary file
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(&self.summary_file)
    }

    /// Full path of the audit file
    pub fn audit_path(&self) -> PathBuf {
        self.dir.join(&self.audit_file)
    }
}

/// tenorx configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Mapping horizon
    #[serde(default)]
    pub horizon: HorizonConfig,

    /// Expansion behaviour
    #[serde(default)]
    pub expansion: ExpansionConfig,

    /// Extra raw-label aliases merged over the fixed product table
    #[serde(default)]
    pub products: BTreeMap<String, String>,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            horizon: HorizonConfig::default(),
            expansion: ExpansionConfig::default(),
            products: BTreeMap::new(),
            output: OutputConfig::default(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(value) = std::env::var("TENORX_START_YEAR") {
            match value.trim().parse() {
                Ok(year) => self.horizon.start_year = year,
                Err(_) => warn!(value = %value, "Ignoring unparseable TENORX_START_YEAR"),
            }
        }

        if let Ok(value) = std::env::var("TENORX_SPAN_YEARS") {
            match value.trim().parse() {
                Ok(span) => self.horizon.span_years = span,
                Err(_) => warn!(value = %value, "Ignoring unparseable TENORX_SPAN_YEARS"),
            }
        }

        if let Ok(value) = std::env::var("TENORX_STRICT") {
            match parse_flag(&value) {
                Some(flag) => self.expansion.strict_tenors = flag,
                None => warn!(value = %value, "Ignoring unparseable TENORX_STRICT"),
            }
        }

        if let Ok(value) = std::env::var("TENORX_PARALLEL") {
            match parse_flag(&value) {
                Some(flag) => self.expansion.parallel = flag,
                None => warn!(value = %value, "Ignoring unparseable TENORX_PARALLEL"),
            }
        }

        if let Ok(dir) = std::env::var("TENORX_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        if let Ok(log_level) = std::env::var("TENORX_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let HorizonConfig {
            start_year,
            span_years,
        } = self.horizon;
        if !(2000..=2099).contains(&start_year) {
            errors.push(format!(
                "start_year {} outside 2000..=2099",
                start_year
            ));
        }
        if !(1..=10).contains(&span_years) {
            errors.push(format!("span_years {} outside 1..=10", span_years));
        } else if (2000..=2099).contains(&start_year)
            && start_year + u16::from(span_years) - 1 > 2099
        {
            // two-digit year keys would wrap into the 2000s
            errors.push(format!(
                "horizon {}+{} years runs past 2099",
                start_year, span_years
            ));
        }

        for (raw, canonical) in &self.products {
            if !is_canonical(canonical) {
                errors.push(format!(
                    "Product alias '{}' targets '{}', expected one of {:?}",
                    raw, canonical, CANONICAL_PRODUCTS
                ));
            }
        }

        for (name, value) in [
            ("expanded_file", &self.output.expanded_file),
            ("summary_file", &self.output.summary_file),
            ("audit_file", &self.output.audit_file),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("output.{} cannot be empty", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Mapping tables for the configured horizon
    pub fn tenor_mappings(&self) -> TenorMappings {
        TenorMappings::build(self.horizon.start_year, self.horizon.span_years)
    }

    /// Fixed product table with the configured aliases merged over it
    pub fn product_map(&self) -> ProductMap {
        self.products
            .iter()
            .fold(ProductMap::default(), |map, (raw, canonical)| {
                map.with_alias(raw.clone(), canonical.clone())
            })
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
