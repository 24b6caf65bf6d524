use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chain::Chain;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::normalize::build_chains;
use super::types::ConfigDocument;

/// File names searched, in order, inside each candidate directory.
pub const DEFAULT_CONFIG_FILES: [&str; 4] = [
    "reqchain.yaml",
    "reqchain.yml",
    "reqchain.toml",
    "reqchain.json",
];

/// A validated configuration ready to hand to the supervisor.
#[derive(Debug)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub duration: Option<Duration>,
    pub chains: Vec<Chain>,
}

/// Finds, reads and validates the chain configuration.
///
/// An explicit `path` may name a file or a directory; otherwise the
/// executable's directory and then the working directory are searched.
///
/// # Errors
///
/// Returns an error when no config is found, or when it cannot be read,
/// parsed or validated.
pub fn load_config(path: Option<&str>) -> AppResult<LoadedConfig> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir()?;
    let path = discover_config_path(path.map(Path::new), exe_dir.as_deref(), &cwd)?;
    load_config_file(&path)
}

pub(crate) fn discover_config_path(
    explicit: Option<&Path>,
    exe_dir: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    let mut searched = Vec::new();

    if let Some(explicit) = explicit {
        if explicit.is_file() {
            return Ok(explicit.to_path_buf());
        }
        let mut dirs = vec![explicit.to_path_buf()];
        if let Some(exe_dir) = exe_dir.filter(|_| explicit.is_relative()) {
            dirs.push(exe_dir.join(explicit));
        }
        for dir in dirs {
            if let Some(found) = find_in_dir(&dir, &mut searched) {
                return Ok(found);
            }
        }
        return Err(not_found(&searched));
    }

    for dir in exe_dir.into_iter().chain(std::iter::once(cwd)) {
        if let Some(found) = find_in_dir(dir, &mut searched) {
            return Ok(found);
        }
    }
    Err(not_found(&searched))
}

fn find_in_dir(dir: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
    if dir.is_file() {
        return Some(dir.to_path_buf());
    }
    DEFAULT_CONFIG_FILES.iter().find_map(|name| {
        let candidate = dir.join(name);
        if candidate.is_file() {
            Some(candidate)
        } else {
            searched.push(candidate);
            None
        }
    })
}

fn not_found(searched: &[PathBuf]) -> ConfigError {
    let searched = searched
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ConfigError::NotFound { searched }
}

/// Reads one config file, choosing the format from its extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, parsed or validated.
pub fn load_config_file(path: &Path) -> AppResult<LoadedConfig> {
    let document = read_document(path)?;
    let (duration, chains) = document.into_parts();

    let duration = duration
        .map(|value| value.to_duration("duration"))
        .transpose()?;
    if duration.is_some_and(|limit| limit.is_zero()) {
        return Err(AppError::config(ConfigError::InvalidDuration {
            field: "duration".to_owned(),
            source: ValidationError::DurationZero,
        }));
    }

    Ok(LoadedConfig {
        path: path.to_path_buf(),
        duration,
        chains: build_chains(chains)?,
    })
}

fn read_document(path: &Path) -> AppResult<ConfigDocument> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
