use clap::Parser;

use crate::error::{AppError, AppResult};

use super::ChainArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<ChainArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ChainArgs::try_parse_from(args).map_err(AppError::from)
}
