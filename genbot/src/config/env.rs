//! Environment lookups shared by the config sections.

use anyhow::{anyhow, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Value of `key`, treating unset and empty as absent.
pub(super) fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `key` when set. A value that does not parse is an error, not a silent default.
pub(super) fn parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(None),
    }
}
