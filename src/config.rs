use crate::{
    result::{Result, SplitterError},
    scanner::StatementSplitter,
    sql_mode::SqlModes,
    version::{DOLLAR_QUOTE_MIN_VERSION, normalize_version, parse_version},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

/// Server version as written in a config file: `80100` or `"8.1.0"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Number(u32),
    Text(String),
}

impl VersionValue {
    /// Resolve to the normalized numeric form
    pub fn resolve(&self) -> Result<u32> {
        match self {
            VersionValue::Number(number) => Ok(normalize_version(*number)),
            VersionValue::Text(text) => parse_version(text),
        }
    }
}

impl Default for VersionValue {
    fn default() -> Self {
        VersionValue::Number(DOLLAR_QUOTE_MIN_VERSION)
    }
}

/// Splitter settings loaded from JSON configuration
///
/// ```json
/// { "delimiter": ";", "version": "8.4.0", "sql_mode": "ANSI,NO_BACKSLASH_ESCAPES" }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub delimiter: String,
    pub version: VersionValue,
    pub sql_mode: String,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        SplitterConfig {
            delimiter: ";".to_string(),
            version: VersionValue::default(),
            sql_mode: String::new(),
        }
    }
}

impl SplitterConfig {
    /// Load a config from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// Load a config from a serde_json::Value object
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }

    /// Validate the settings and build a splitter from them
    pub fn into_splitter(self) -> Result<StatementSplitter> {
        let version = self.version.resolve()?;
        let modes = self.sql_mode.parse::<SqlModes>().unwrap_or_default();
        Ok(StatementSplitter::new(self.delimiter, version)?.with_sql_modes(&modes))
    }
}

impl FromStr for SplitterConfig {
    type Err = SplitterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
