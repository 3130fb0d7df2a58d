//! Value parsing shared by the `--config KEY=VALUE` handlers.
use std::str::FromStr;

use crate::error::ConfigError;

/// Parse a boolean override. Accepts true/false, yes/no and 1/0.
///
/// # Errors
///
/// Returns an error if the value is none of the accepted spellings.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" => Ok(true),
    "false" | "no" | "0" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, or 1/0"
      )))
    },
  }
}

/// Parse any `FromStr` value.
///
/// # Errors
///
/// Returns an error if the value does not parse.
pub fn parse_value<T: FromStr>(
  key: &str,
  value: &str,
) -> Result<T, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::Config(format!("Invalid value for '{key}': '{value}'"))
  })
}

/// Parse an optional value, where the empty string means `None`.
///
/// # Errors
///
/// Returns an error if a non-empty value does not parse.
pub fn parse_optional<T: FromStr>(
  key: &str,
  value: &str,
) -> Result<Option<T>, ConfigError> {
  if value.is_empty() {
    Ok(None)
  } else {
    parse_value(key, value).map(Some)
  }
}

/// Error for a key no config section knows about.
#[must_use]
pub fn unknown_key(key: &str) -> ConfigError {
  ConfigError::Config(format!(
    "Unknown configuration key: '{key}'. See documentation for supported keys."
  ))
}
