use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  overrides::{parse_bool, parse_value, unknown_key},
};

/// Options for PDF output through a headless browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
  /// Produce a PDF next to every HTML file.
  pub enable: bool,

  /// Browser binary to use. Looked up on `PATH` when unset.
  pub browser: Option<PathBuf>,

  /// Device scale factor used for rasterizing. Higher values give sharper
  /// images.
  pub device_scale_factor: f64,

  /// Virtual time, in milliseconds, the page gets to load its resources
  /// before printing.
  pub settle_time_ms: u64,
}

impl Default for PdfConfig {
  fn default() -> Self {
    Self {
      enable:              false,
      browser:             None,
      device_scale_factor: 2.0,
      settle_time_ms:      5000,
    }
  }
}

impl PdfConfig {
  /// Apply a single override. `key` is relative to the `pdf` table.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "enable" => self.enable = parse_bool("pdf.enable", value)?,
      "browser" => {
        self.browser = if value.is_empty() {
          None
        } else {
          Some(PathBuf::from(value))
        };
      },
      "device_scale_factor" => {
        self.device_scale_factor =
          parse_value("pdf.device_scale_factor", value)?;
      },
      "settle_time_ms" => {
        self.settle_time_ms = parse_value("pdf.settle_time_ms", value)?;
      },
      _ => return Err(unknown_key(&format!("pdf.{key}"))),
    }
    Ok(())
  }

  /// Check value ranges.
  ///
  /// # Errors
  ///
  /// Returns an error if the scale factor is not a positive number.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.device_scale_factor.is_finite() || self.device_scale_factor <= 0.0
    {
      return Err(ConfigError::Config(format!(
        "pdf.device_scale_factor must be positive, got {}",
        self.device_scale_factor
      )));
    }
    Ok(())
  }
}
