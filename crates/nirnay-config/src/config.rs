use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  layout::LayoutConfig,
  overrides::{parse_optional, unknown_key},
  pdf::PdfConfig,
  postprocess::PostprocessConfig,
};

/// Configuration for nirnay.
///
/// [`Config`] holds everything that controls how documents are rendered and
/// where the results go. Fields are typically loaded from a TOML or JSON
/// config file, then adjusted by `--config KEY=VALUE` overrides and CLI
/// arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Output directory for rendered files.
  pub output_dir: PathBuf,

  /// Suffix appended to the input file stem for output names.
  pub file_suffix: String,

  /// Paths to extra stylesheets, appended after the built-in ones.
  pub stylesheet_paths: Vec<PathBuf>,

  /// Number of threads to use for parallel rendering.
  pub jobs: Option<usize>,

  /// Page layout.
  pub layout: LayoutConfig,

  /// PDF output.
  pub pdf: PdfConfig,

  /// Postprocessing configuration for HTML minification
  pub postprocess: Option<PostprocessConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:       PathBuf::from("out"),
      file_suffix:      "_nirnay".to_string(),
      stylesheet_paths: Vec::new(),
      jobs:             None,
      layout:           LayoutConfig::default(),
      pdf:              PdfConfig::default(),
      postprocess:      None,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    match extension.as_deref() {
      Some("json") => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some("toml") => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Some(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
      None => {
        Err(ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from the given files, or a discovered one, then
  /// apply `KEY=VALUE` overrides.
  ///
  /// Multiple files are merged in order, later files taking precedence.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is invalid, or
  /// the result fails validation.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged_config = Self::from_file(first)?;
      for config_path in rest {
        merged_config.merge(Self::from_file(config_path)?);
      }

      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }

      merged_config
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config)?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Nested keys use dots, e.g. `layout.columns=1` or `pdf.enable=true`.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in KEY=VALUE format, names an
  /// unknown key, or carries a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    if let Some((section, rest)) = key.split_once('.') {
      return match section {
        "layout" => self.layout.apply_override(rest, value),
        "pdf" => self.pdf.apply_override(rest, value),
        "postprocess" => {
          self
            .postprocess
            .get_or_insert_with(PostprocessConfig::default)
            .apply_override(rest, value)
        },
        _ => Err(unknown_key(key)),
      };
    }

    match key {
      "output_dir" => self.output_dir = PathBuf::from(value),
      "file_suffix" => self.file_suffix = value.to_string(),
      "jobs" => self.jobs = parse_optional("jobs", value)?,
      _ => return Err(unknown_key(key)),
    }
    Ok(())
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// # Merge Rules
  ///
  /// - [`Option<T>`] fields: Other's [`Some`] value replaces this config's
  ///   value
  /// - [`Vec<T>`] fields: Other's vec is appended to this config's vec
  /// - Plain fields and nested tables: Other's value always replaces
  pub fn merge(&mut self, other: Self) {
    self.output_dir = other.output_dir;
    self.file_suffix = other.file_suffix;
    self.stylesheet_paths.extend(other.stylesheet_paths);
    if other.jobs.is_some() {
      self.jobs = other.jobs;
    }
    self.layout = other.layout;
    self.pdf = other.pdf;
    if other.postprocess.is_some() {
      self.postprocess = other.postprocess;
    }
  }

  /// Check value ranges.
  ///
  /// # Errors
  ///
  /// Returns an error describing the first invalid value.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.file_suffix.contains(['/', '\\']) {
      return Err(ConfigError::Config(format!(
        "file_suffix must not contain path separators: '{}'",
        self.file_suffix
      )));
    }
    if self.jobs == Some(0) {
      return Err(ConfigError::Config(
        "jobs must be at least 1".to_string(),
      ));
    }
    self.layout.validate()?;
    self.pdf.validate()
  }

  /// Validate all paths specified in the configuration
  ///
  /// # Errors
  ///
  /// Returns an error if any configured path does not exist or is invalid.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    for (index, stylesheet_path) in self.stylesheet_paths.iter().enumerate() {
      if !stylesheet_path.exists() {
        errors.push(format!(
          "Stylesheet file {} does not exist: {}",
          index + 1,
          stylesheet_path.display()
        ));
      } else if !stylesheet_path.is_file() {
        errors.push(format!(
          "Stylesheet path {} is not a file: {}",
          index + 1,
          stylesheet_path.display()
        ));
      }
    }

    if let Some(ref browser) = self.pdf.browser
      && browser.components().count() > 1
      && !browser.is_file()
    {
      errors.push(format!(
        "Browser binary does not exist: {}",
        browser.display()
      ));
    }

    if !errors.is_empty() {
      let error_message = errors.join("\n");
      return Err(ConfigError::Config(format!(
        "Configuration path validation errors:\n{error_message}"
      )));
    }

    Ok(())
  }

  /// File name of an output for the given input stem and extension, e.g.
  /// `notes_nirnay.html`.
  #[must_use]
  pub fn output_name(&self, stem: &str, extension: &str) -> String {
    format!("{stem}{}.{extension}", self.file_suffix)
  }

  /// Path of an output file inside the output directory.
  #[must_use]
  pub fn output_path(&self, stem: &str, extension: &str) -> PathBuf {
    self.output_dir.join(self.output_name(stem, extension))
  }

  /// Whether HTML minification is enabled.
  #[must_use]
  pub fn minify_html(&self) -> bool {
    self.postprocess.as_ref().is_some_and(|p| p.minify_html)
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let config_filenames = [
          "nirnay.toml",
          "nirnay.json",
          ".nirnay.toml",
          ".nirnay.json",
          ".config/nirnay.toml",
          ".config/nirnay.json",
        ];

        let current_dir = std::env::current_dir().ok()?;
        for filename in &config_filenames {
          let config_path = current_dir.join(filename);
          if config_path.exists() {
            return Some(config_path);
          }
        }

        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
          let xdg_config_dir = PathBuf::from(xdg_config_home);
          for filename in &["nirnay.toml", "nirnay.json"] {
            let config_path = xdg_config_dir.join(filename);
            if config_path.exists() {
              return Some(config_path);
            }
          }
        }

        None
      })
      .clone()
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export the embedded style sheets to a directory for customization.
  /// Existing files are kept unless `force` is set. Returns the written
  /// paths.
  ///
  /// # Errors
  ///
  /// Returns an error if the output directory cannot be created or a file
  /// cannot be written.
  pub fn export_stylesheets(
    output_dir: &Path,
    force: bool,
  ) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to create stylesheet directory: {}: {}",
        output_dir.display(),
        e
      ))
    })?;

    let mut written = Vec::new();
    for (filename, content) in nirnay_templates::all_stylesheets() {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write stylesheet: {}: {}",
          file_path.display(),
          e
        ))
      })?;
      log::info!("Exported stylesheet: {}", file_path.display());
      written.push(file_path);
    }

    Ok(written)
  }
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_config_merge_option_fields() {
    let mut base = Config::default();
    base.jobs = Some(4);

    let mut override_config = Config::default();
    override_config.jobs = None;
    override_config.postprocess = Some(PostprocessConfig {
      minify_html: true,
      html:        None,
    });

    base.merge(override_config);

    assert_eq!(base.jobs, Some(4));
    assert!(base.minify_html());
  }

  #[test]
  fn test_config_merge_vec_fields_append() {
    let mut base = Config::default();
    base.stylesheet_paths = vec![PathBuf::from("base.css")];

    let mut override_config = Config::default();
    override_config.stylesheet_paths = vec![PathBuf::from("override.css")];

    base.merge(override_config);

    assert_eq!(base.stylesheet_paths, vec![
      PathBuf::from("base.css"),
      PathBuf::from("override.css")
    ]);
  }

  #[test]
  fn test_apply_overrides_nested() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "layout.columns=1".to_string(),
        "pdf.enable=yes".to_string(),
        "postprocess.minify_html=true".to_string(),
        "file_suffix=_print".to_string(),
        "jobs=3".to_string(),
      ])
      .unwrap();

    assert_eq!(config.layout.columns, 1);
    assert!(config.pdf.enable);
    assert!(config.minify_html());
    assert_eq!(config.file_suffix, "_print");
    assert_eq!(config.jobs, Some(3));
  }

  #[test]
  fn test_apply_overrides_invalid_format() {
    let mut config = Config::default();
    let result = config.apply_overrides(&["no_equals_sign".to_string()]);
    assert!(
      result
        .unwrap_err()
        .to_string()
        .contains("Expected KEY=VALUE")
    );
  }

  #[test]
  fn test_apply_overrides_unknown_key() {
    let mut config = Config::default();
    for key in ["unknown_key=value", "theme.color=red", "layout.x=1"] {
      let result = config.apply_overrides(&[key.to_string()]);
      assert!(
        result
          .unwrap_err()
          .to_string()
          .contains("Unknown configuration key"),
        "{key}"
      );
    }
  }

  #[test]
  fn test_apply_overrides_invalid_numeric() {
    let mut config = Config::default();
    let result = config.apply_overrides(&["jobs=not_a_number".to_string()]);
    assert!(result.unwrap_err().to_string().contains("Invalid value"));
  }

  #[test]
  fn test_validate() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.file_suffix = "/x".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.jobs = Some(0);
    assert!(config.validate().is_err());

    config = Config::default();
    config.layout.columns = 4;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_output_path() {
    let config = Config::default();
    assert_eq!(config.output_name("notes", "html"), "notes_nirnay.html");
    assert_eq!(
      config.output_path("2024-05-01", "pdf"),
      PathBuf::from("out/2024-05-01_nirnay.pdf")
    );
  }

  #[test]
  fn test_from_file_toml_and_json() {
    let dir = tempfile::tempdir().unwrap();

    let toml_path = dir.path().join("nirnay.toml");
    fs::write(
      &toml_path,
      "output_dir = \"pdfs\"\n[layout]\ncolumns = 1\n[pdf]\nenable = true\n",
    )
    .unwrap();
    let config = Config::from_file(&toml_path).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("pdfs"));
    assert_eq!(config.layout.columns, 1);
    assert!(config.layout.figure_wrapping);
    assert!(config.pdf.enable);

    let json_path = dir.path().join("nirnay.json");
    fs::write(&json_path, r#"{"file_suffix": "_x"}"#).unwrap();
    let config = Config::from_file(&json_path).unwrap();
    assert_eq!(config.file_suffix, "_x");
    assert_eq!(config.output_dir, PathBuf::from("out"));
  }

  #[test]
  fn test_from_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let yaml = dir.path().join("nirnay.yaml");
    fs::write(&yaml, "a: b").unwrap();
    assert!(
      Config::from_file(&yaml)
        .unwrap_err()
        .to_string()
        .contains("Unsupported config file format")
    );

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "layout = [").unwrap();
    assert!(
      Config::from_file(&broken)
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML")
    );

    assert!(Config::from_file(dir.path().join("missing.toml")).is_err());
  }

  #[test]
  fn test_load_merges_files_then_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.toml");
    let second = dir.path().join("b.toml");
    fs::write(&first, "stylesheet_paths = [\"a.css\"]\njobs = 2\n").unwrap();
    fs::write(&second, "stylesheet_paths = [\"b.css\"]\n").unwrap();

    let config =
      Config::load(&[first, second], &["layout.columns=1".to_string()])
        .unwrap();
    assert_eq!(config.stylesheet_paths.len(), 2);
    assert_eq!(config.jobs, Some(2));
    assert_eq!(config.layout.columns, 1);

    let invalid = Config::load(&[], &["layout.columns=3".to_string()]);
    assert!(invalid.is_err());
  }

  #[test]
  fn test_validate_paths() {
    let dir = tempfile::tempdir().unwrap();
    let css = dir.path().join("extra.css");
    fs::write(&css, "p{}").unwrap();

    let mut config = Config::default();
    config.stylesheet_paths = vec![css];
    assert!(config.validate_paths().is_ok());

    config.stylesheet_paths.push(dir.path().join("missing.css"));
    config.pdf.browser = Some(dir.path().join("no-such-browser"));
    let message = config.validate_paths().unwrap_err().to_string();
    assert!(message.contains("Stylesheet file 2 does not exist"));
    assert!(message.contains("Browser binary does not exist"));
  }

  #[test]
  fn test_generate_default_config_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nirnay.toml");
    Config::generate_default_config("toml", &path).unwrap();
    assert!(Config::from_file(&path).is_ok());
    assert!(Config::generate_default_config("yaml", &path).is_err());

    let css_dir = dir.path().join("css");
    let written = Config::export_stylesheets(&css_dir, false).unwrap();
    assert_eq!(written.len(), 3);
    let again = Config::export_stylesheets(&css_dir, false).unwrap();
    assert!(again.is_empty());
    let forced = Config::export_stylesheets(&css_dir, true).unwrap();
    assert_eq!(forced.len(), 3);
  }
}
