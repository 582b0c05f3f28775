// src/config.rs

//! Manages configuration of the `jbp-extract` binary: loading from TOML and validation.

use crate::core::Selector;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use tracing::warn;

/// How extraction results are written to stdout.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
}

/// A raw representation of the config file before validation.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    output: OutputFormat,
    #[serde(default)]
    selector: Option<String>,
    #[serde(default)]
    input: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Represents the final, validated configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub log_level: String,
    pub output: OutputFormat,
    /// Selector in its JSON form, used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Path of the input document. Stdin is read when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputFormat::default(),
            selector: None,
            input: None,
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config in '{path}'"))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw_config: RawConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;

        let config = Config {
            log_level: raw_config.log_level,
            output: raw_config.output,
            selector: raw_config.selector,
            input: raw_config.input,
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses the configured selector, if any.
    pub fn parsed_selector(&self) -> Result<Option<Selector>> {
        self.selector
            .as_deref()
            .map(|s| parse_selector(s).context("Invalid selector in configuration"))
            .transpose()
    }

    /// Validates the configuration to ensure logical consistency.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }

        if let Some(input) = &self.input
            && input.trim().is_empty()
        {
            return Err(anyhow!("input cannot be an empty path"));
        }

        if let Some(selector) = self.parsed_selector()?
            && let Selector::Fields(items) = &selector
            && items.is_empty()
        {
            warn!("configured selector is empty; every extraction will yield {{}}");
        }
        Ok(())
    }
}

/// Parses a selector from its JSON text. A broken selector is reported in its
/// `{"msg": .., "ctx": ..}` form so the whole wrapper chain is visible.
pub fn parse_selector(text: &str) -> Result<Selector> {
    let pointer: Value = serde_json::from_str(text).context("Selector is not valid JSON")?;
    Selector::parse(&pointer).map_err(|e| anyhow!("{}", e.to_json()))
}
