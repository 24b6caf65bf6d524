use std::time::Duration;

use reqwest::Method;

use crate::chain::{Chain, Entry, Repeats};
use crate::error::ConfigError;

use super::types::{ChainConfig, DurationValue, EntryConfig};

/// Converts loaded chain configs into the engine model: methods derived or
/// validated, zero repeats made unbounded, delay bounds checked.
///
/// # Errors
///
/// Returns the first validation failure, naming chain and entry (1-based).
pub fn build_chains(configs: Vec<ChainConfig>) -> Result<Vec<Chain>, ConfigError> {
    configs
        .into_iter()
        .enumerate()
        .map(|(offset, config)| build_chain(offset.saturating_add(1), config))
        .collect()
}

fn build_chain(chain: usize, config: ChainConfig) -> Result<Chain, ConfigError> {
    if config.entries.is_empty() {
        return Err(ConfigError::ChainMissingEntries { chain });
    }

    let entries = config
        .entries
        .into_iter()
        .enumerate()
        .map(|(offset, entry)| build_entry(chain, offset.saturating_add(1), entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Chain {
        entries,
        repeats: Repeats::from_count(config.repeats.unwrap_or(0)),
    })
}

fn build_entry(chain: usize, entry: usize, config: EntryConfig) -> Result<Entry, ConfigError> {
    let url = config.url.trim();
    if url.is_empty() {
        return Err(ConfigError::EntryMissingUrl { chain, entry });
    }

    let body = config.data.filter(|data| !data.is_empty());
    let method = derive_method(config.method.as_deref(), body.is_some()).ok_or_else(|| {
        ConfigError::InvalidMethod {
            chain,
            entry,
            method: config.method.clone().unwrap_or_default(),
        }
    })?;

    let delay_min = optional_delay(config.delay_min.as_ref(), chain, entry, "delay-min")?;
    let delay_max = optional_delay(config.delay_max.as_ref(), chain, entry, "delay-max")?;
    if !delay_max.is_zero() && delay_max < delay_min {
        return Err(ConfigError::InvalidDelayRange {
            chain,
            entry,
            min: delay_min,
            max: delay_max,
        });
    }

    Ok(Entry {
        url: url.to_owned(),
        method,
        body,
        bearer_token: config.token.filter(|token| !token.is_empty()),
        delay_min,
        delay_max,
        wait_for_reply: config.wait_reply.unwrap_or(false),
    })
}

/// Missing or blank methods become `POST` with a body and `GET` without.
fn derive_method(method: Option<&str>, has_body: bool) -> Option<Method> {
    match method.map(str::trim).filter(|method| !method.is_empty()) {
        Some(method) => Method::from_bytes(method.to_ascii_uppercase().as_bytes()).ok(),
        None if has_body => Some(Method::POST),
        None => Some(Method::GET),
    }
}

fn optional_delay(
    value: Option<&DurationValue>,
    chain: usize,
    entry: usize,
    field: &str,
) -> Result<Duration, ConfigError> {
    value.map_or(Ok(Duration::ZERO), |duration| {
        duration.to_duration(&format!("chain {} entry {} {}", chain, entry, field))
    })
}
