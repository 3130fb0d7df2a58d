use color_eyre::eyre::{Context, Result};
use nirnay_config::{Config, PostprocessConfig};

use crate::cli::{Cli, RenderArgs};

/// Load the configuration for a render run: config files (or the discovered
/// one), `--config` overrides, then the `render` flags on top.
///
/// # Errors
///
/// Returns an error if loading fails or the merged configuration is invalid.
pub fn load(cli: &Cli, args: &RenderArgs) -> Result<Config> {
  let mut config = Config::load(&cli.config_files, &cli.config_overrides)
    .wrap_err("Failed to load configuration")?;

  merge_with_cli(&mut config, args);

  config.validate().wrap_err("Invalid configuration")?;
  config.validate_paths().wrap_err("Invalid configuration")?;
  Ok(config)
}

/// Apply `render` flags over loaded values. Flags that were not given leave
/// the loaded value alone; boolean flags can only switch a feature on.
pub fn merge_with_cli(config: &mut Config, args: &RenderArgs) {
  if let Some(output_dir) = &args.output_dir {
    config.output_dir.clone_from(output_dir);
  }
  if let Some(jobs) = args.jobs {
    config.jobs = Some(jobs);
  }
  if let Some(columns) = args.columns {
    config.layout.columns = columns;
  }
  if args.page_break_after_index {
    config.layout.page_break_after_index = true;
  }
  if args.no_figures {
    config.layout.figure_wrapping = false;
  }
  if args.pdf {
    config.pdf.enable = true;
  }
  if let Some(browser) = &args.browser {
    config.pdf.browser = Some(browser.clone());
  }
  if args.minify {
    config
      .postprocess
      .get_or_insert_with(PostprocessConfig::default)
      .minify_html = true;
  }
  config.stylesheet_paths.extend(args.stylesheet.iter().cloned());
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_unset_flags_keep_loaded_values() {
    let mut config = Config::default();
    config.layout.columns = 1;
    config.layout.page_break_after_index = true;
    config.stylesheet_paths.push(PathBuf::from("base.css"));

    merge_with_cli(&mut config, &RenderArgs::default());

    assert_eq!(config.layout.columns, 1);
    assert!(config.layout.page_break_after_index);
    assert!(config.layout.figure_wrapping);
    assert!(!config.pdf.enable);
    assert!(!config.minify_html());
    assert_eq!(config.output_dir, PathBuf::from("out"));
  }

  #[test]
  fn test_flags_override() {
    let mut config = Config::default();
    config.stylesheet_paths.push(PathBuf::from("base.css"));
    let args = RenderArgs {
      output_dir: Some(PathBuf::from("build")),
      pdf: true,
      columns: Some(1),
      no_figures: true,
      minify: true,
      browser: Some(PathBuf::from("chromium")),
      stylesheet: vec![PathBuf::from("extra.css")],
      jobs: Some(3),
      ..Default::default()
    };

    merge_with_cli(&mut config, &args);

    assert_eq!(config.output_dir, PathBuf::from("build"));
    assert!(config.pdf.enable);
    assert_eq!(config.pdf.browser, Some(PathBuf::from("chromium")));
    assert_eq!(config.layout.columns, 1);
    assert!(!config.layout.figure_wrapping);
    assert!(config.minify_html());
    assert_eq!(config.jobs, Some(3));
    assert_eq!(
      config.stylesheet_paths,
      vec![PathBuf::from("base.css"), PathBuf::from("extra.css")]
    );
  }
}
