use std::path::PathBuf;
use std::time::Duration;

use super::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse YAML config '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .yaml, .yml, .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .yaml, .yml, .toml or .json extension.")]
    MissingExtension,
    #[error("No configuration file was found (searched: {searched}).")]
    NotFound { searched: String },
    #[error("No chains of request entries were loaded.")]
    ConfigurationAbsent,
    #[error("Chain {chain} must include at least one entry.")]
    ChainMissingEntries { chain: usize },
    #[error("Chain {chain} entry {entry} must define a url.")]
    EntryMissingUrl { chain: usize, entry: usize },
    #[error("Chain {chain} entry {entry} has invalid method '{method}'.")]
    InvalidMethod {
        chain: usize,
        entry: usize,
        method: String,
    },
    #[error("Chain {chain} entry {entry}: delay-max {max:?} is less than delay-min {min:?}.")]
    InvalidDelayRange {
        chain: usize,
        entry: usize,
        min: Duration,
        max: Duration,
    },
    #[error("Invalid duration for '{field}': {source}")]
    InvalidDuration {
        field: String,
        #[source]
        source: ValidationError,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
