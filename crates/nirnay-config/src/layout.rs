use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  overrides::{parse_bool, parse_value, unknown_key},
};

/// Page layout of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  /// Number of text columns, 1 or 2.
  pub columns: u8,

  /// Start the first topic on a new page, leaving the title and contents on
  /// their own.
  pub page_break_after_index: bool,

  /// Wrap images in figure containers.
  pub figure_wrapping: bool,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      columns:                2,
      page_break_after_index: false,
      figure_wrapping:        true,
    }
  }
}

impl LayoutConfig {
  /// Apply a single override. `key` is relative to the `layout` table.
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
      "columns" => self.columns = parse_value("layout.columns", value)?,
      "page_break_after_index" => {
        self.page_break_after_index =
          parse_bool("layout.page_break_after_index", value)?;
      },
      "figure_wrapping" => {
        self.figure_wrapping = parse_bool("layout.figure_wrapping", value)?;
      },
      _ => return Err(unknown_key(&format!("layout.{key}"))),
    }
    Ok(())
  }

  /// Check value ranges.
  ///
  /// # Errors
  ///
  /// Returns an error if `columns` is not 1 or 2.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(1..=2).contains(&self.columns) {
      return Err(ConfigError::Config(format!(
        "layout.columns must be 1 or 2, got {}",
        self.columns
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_layout_overrides() {
    let mut layout = LayoutConfig::default();
    layout.apply_override("columns", "1").unwrap();
    layout.apply_override("page_break_after_index", "yes").unwrap();
    layout.apply_override("figure_wrapping", "0").unwrap();
    assert_eq!(layout, LayoutConfig {
      columns:                1,
      page_break_after_index: true,
      figure_wrapping:        false,
    });
  }

  #[test]
  fn test_layout_validate() {
    let mut layout = LayoutConfig::default();
    assert!(layout.validate().is_ok());
    layout.columns = 3;
    assert!(layout.validate().is_err());
    layout.columns = 0;
    assert!(layout.validate().is_err());
  }

  #[test]
  fn test_unknown_layout_key() {
    let err = LayoutConfig::default()
      .apply_override("gutter", "4")
      .unwrap_err();
    assert!(err.to_string().contains("'layout.gutter'"));
  }
}
