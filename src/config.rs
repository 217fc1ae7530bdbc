//! Configuration file support for pypi-risk-graph.
//!
//! Provides YAML-based configuration through `pypi-risk-graph.config.yml`
//! files, and merges it with command-line flags into [`Settings`].

use anyhow::Context;
use pypi_risk_graph::application::dto::OutputFormat;
use pypi_risk_graph::dependency_analysis::policies::RiskWeights;
use pypi_risk_graph::dependency_analysis::services::{GraphFilter, ResolverConfig};
use pypi_risk_graph::shared::error::AnalysisError;
use pypi_risk_graph::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::cli::Args;

pub const CONFIG_FILENAME: &str = "pypi-risk-graph.config.yml";

const DEFAULT_MAX_DEPTH: usize = 3;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_CONCURRENCY: usize = 64;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub max_depth: Option<usize>,
    pub format: Option<String>,
    pub concurrency: Option<usize>,
    pub fetch_timeout_secs: Option<u64>,
    pub cve_only: Option<bool>,
    pub min_risk_score: Option<f64>,
    pub max_level: Option<usize>,
    pub weights: Option<RiskWeights>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective settings after merging defaults, config file and CLI flags
/// (in increasing precedence).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub package: String,
    pub max_depth: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub filter: GraphFilter,
    pub resolver: ResolverConfig,
    pub weights: RiskWeights,
    pub fail_on_cve: bool,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn invalid(message: impl Into<String>, hint: impl Into<String>) -> anyhow::Error {
    AnalysisError::InvalidConfig {
        message: message.into(),
        hint: hint.into(),
    }
    .into()
}

fn validate_concurrency(concurrency: usize) -> Result<()> {
    if concurrency == 0 || concurrency > MAX_CONCURRENCY {
        return Err(invalid(
            format!("concurrency must be between 1 and {}, got {}", MAX_CONCURRENCY, concurrency),
            "Use 1 for a fully sequential walk.",
        ));
    }
    Ok(())
}

fn validate_min_risk_score(score: f64) -> Result<()> {
    if !(0.0..=10.0).contains(&score) {
        return Err(invalid(
            format!("min_risk_score must be between 0 and 10, got {}", score),
            "Risk scores use a 0-10 scale.",
        ));
    }
    Ok(())
}

fn validate_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(invalid(
            "fetch timeout must be at least 1 second",
            "Omit the setting to use the 10 second default.",
        ));
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        OutputFormat::from_str(format).map_err(|e| invalid(e.to_string(), "Set format to graph, tree or flat."))?;
    }
    if let Some(concurrency) = config.concurrency {
        validate_concurrency(concurrency)?;
    }
    if let Some(seconds) = config.fetch_timeout_secs {
        validate_timeout(seconds)?;
    }
    if let Some(score) = config.min_risk_score {
        validate_min_risk_score(score)?;
    }
    if let Some(weights) = &config.weights {
        weights
            .validate()
            .map_err(|e| invalid(e.to_string(), "Weights are relative; any non-negative numbers work."))?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}

impl Settings {
    /// Merges CLI flags over the config file over built-in defaults.
    ///
    /// Boolean flags can only switch a setting on; `--cve-only` absent keeps
    /// the config file's value.
    pub fn merge(args: &Args, config: Option<ConfigFile>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => OutputFormat::from_str(format)?,
            (None, None) => OutputFormat::default(),
        };

        let concurrency = args.concurrency.or(config.concurrency).unwrap_or(1);
        validate_concurrency(concurrency)?;

        let timeout_secs = args
            .timeout
            .or(config.fetch_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        validate_timeout(timeout_secs)?;

        let min_risk_score = args.min_risk_score.or(config.min_risk_score);
        if let Some(score) = min_risk_score {
            validate_min_risk_score(score)?;
        }

        Ok(Self {
            package: args.package.clone(),
            max_depth: args
                .max_depth
                .or(config.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            format,
            output: args.output.clone(),
            filter: GraphFilter {
                cve_only: args.cve_only || config.cve_only.unwrap_or(false),
                min_risk_score,
                max_level: args.max_level.or(config.max_level),
            },
            resolver: ResolverConfig {
                fetch_timeout: Duration::from_secs(timeout_secs),
                concurrency,
            },
            weights: config.weights.unwrap_or_default(),
            fail_on_cve: args.fail_on_cve,
        })
    }
}
