use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  overrides::{parse_bool, unknown_key},
};

/// Configuration for HTML postprocessing
///
/// Minification uses `minify-html`. The embedded style sheet is minified
/// along with the markup.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PostprocessConfig {
  /// Whether to minify HTML output
  pub minify_html: bool,

  /// Options specific to HTML minification
  pub html: Option<HtmlMinifyOptions>,
}

/// Options for HTML minification
///
/// These control `minify-html` behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlMinifyOptions {
  /// Remove HTML comments
  pub remove_comments: bool,
}

impl Default for HtmlMinifyOptions {
  fn default() -> Self {
    Self {
      remove_comments: true,
    }
  }
}

impl PostprocessConfig {
  /// Get HTML minify options or default
  #[must_use]
  pub fn html_options(&self) -> HtmlMinifyOptions {
    self.html.clone().unwrap_or_default()
  }

  /// Apply a single override. `key` is relative to the `postprocess` table.
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
      "minify_html" => {
        self.minify_html = parse_bool("postprocess.minify_html", value)?;
      },
      "html.remove_comments" => {
        self
          .html
          .get_or_insert_with(HtmlMinifyOptions::default)
          .remove_comments =
          parse_bool("postprocess.html.remove_comments", value)?;
      },
      _ => return Err(unknown_key(&format!("postprocess.{key}"))),
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_postprocess_config_apply_override_bools() {
    let mut config = PostprocessConfig::default();
    assert!(!config.minify_html);

    config.apply_override("minify_html", "true").unwrap();
    assert!(config.minify_html);
  }

  #[test]
  fn test_postprocess_config_nested_html() {
    let mut config = PostprocessConfig::default();
    assert!(config.html_options().remove_comments);

    config
      .apply_override("html.remove_comments", "false")
      .unwrap();
    assert!(config.html.is_some());
    assert!(!config.html_options().remove_comments);
  }

  #[test]
  fn test_postprocess_config_deserialize() {
    let config: PostprocessConfig = toml::from_str(
      r"
minify_html = true

[html]
remove_comments = false
",
    )
    .unwrap();
    assert!(config.minify_html);
    assert!(!config.html_options().remove_comments);
  }
}
