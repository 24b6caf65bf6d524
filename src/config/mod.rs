//! Chain configuration: discovery, parsing and validation.
mod loader;
mod normalize;
mod parse;
pub mod types;


pub use loader::{DEFAULT_CONFIG_FILES, LoadedConfig, load_config, load_config_file};
pub use normalize::build_chains;

pub(crate) use parse::parse_duration_value;
