use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg};
use super::test_support::parse_test_args;
use crate::error::{AppError, AppResult};

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["reqchain"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);
    let expected_config = std::env::var("REQCHAIN_CONFIG_PATH").ok();

    let checks = [
        (args.config == expected_config, "Unexpected config"),
        (args.duration.is_none(), "Expected no duration"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
    ];
    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args(["reqchain", "-c", "conf/chains.yaml", "-d", "1m30s", "-v"])?;

    if args.config.as_deref() != Some("conf/chains.yaml") {
        return Err(AppError::validation("Unexpected config"));
    }
    if args.duration != Some(Duration::from_secs(90)) {
        return Err(AppError::validation(format!(
            "Unexpected duration: {:?}",
            args.duration
        )));
    }
    if !args.verbose {
        return Err(AppError::validation("Expected verbose to be true"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_duration() -> AppResult<()> {
    if parse_test_args(["reqchain", "--duration", "0s"]).is_ok() {
        return Err(AppError::validation("Zero duration should be rejected"));
    }
    if parse_test_args(["reqchain", "--duration", "soon"]).is_ok() {
        return Err(AppError::validation("Malformed duration should be rejected"));
    }
    Ok(())
}

#[test]
fn parse_duration_arg_accepts_bare_seconds() -> AppResult<()> {
    let parsed = parse_duration_arg("15")?;
    if parsed != Duration::from_secs(15) {
        return Err(AppError::validation(format!(
            "Unexpected duration: {:?}",
            parsed
        )));
    }
    Ok(())
}

#[test]
fn parse_bool_env_variants() -> AppResult<()> {
    for value in ["1", "true", "YES", " on "] {
        if !parse_bool_env(value)? {
            return Err(AppError::validation(format!("'{}' should be true", value)));
        }
    }
    for value in ["0", "false", "No", "off"] {
        if parse_bool_env(value)? {
            return Err(AppError::validation(format!("'{}' should be false", value)));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("'maybe' should be rejected"));
    }
    Ok(())
}
