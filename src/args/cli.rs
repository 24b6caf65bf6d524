use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP request-chain runner - drives ordered request workflows in parallel until shutdown, then reports totals."
)]
pub struct ChainArgs {
    /// Config file or directory to search (YAML/TOML/JSON). Defaults to reqchain.{yaml,yml,toml,json} next to the binary, then in the working directory.
    #[arg(long, short = 'c', env = "REQCHAIN_CONFIG_PATH")]
    pub config: Option<String>,

    /// Stop all chains after this long (supports ms/s/m/h); overrides the config duration
    #[arg(long, short = 'd', value_parser = parse_duration_arg)]
    pub duration: Option<Duration>,

    /// Enable verbose logging (sets log level to debug unless overridden by REQCHAIN_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
