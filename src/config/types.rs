use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// A config document: either a bare list of chains or a table with run
/// settings and a `chains` list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ConfigDocument {
    Chains(Vec<ChainConfig>),
    File(ConfigFile),
}

impl ConfigDocument {
    pub(crate) fn into_parts(self) -> (Option<DurationValue>, Vec<ChainConfig>) {
        match self {
            Self::Chains(chains) => (None, chains),
            Self::File(file) => (file.duration, file.chains),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub duration: Option<DurationValue>,
    #[serde(default)]
    pub chains: Vec<ChainConfig>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
    pub repeats: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EntryConfig {
    #[serde(default)]
    pub url: String,
    pub method: Option<String>,
    #[serde(alias = "body")]
    pub data: Option<String>,
    #[serde(alias = "bearer-token")]
    pub token: Option<String>,
    pub delay_min: Option<DurationValue>,
    pub delay_max: Option<DurationValue>,
    #[serde(alias = "wait-for-reply")]
    pub wait_reply: Option<bool>,
}

/// Whole seconds, or a string such as `250ms`, `90m` or `1h30m`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    /// Zero is a valid result; callers decide whether it is acceptable.
    pub(crate) fn to_duration(&self, field: &str) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => {
                super::parse_duration_value(text).map_err(|err| ConfigError::InvalidDuration {
                    field: field.to_owned(),
                    source: err,
                })
            }
        }
    }
}
