use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use nirnay::{
  cli::{Cli, Commands, RenderArgs},
  config,
  render,
};
use nirnay_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .parse_default_env()
    .init();

  match &cli.command {
    Commands::Render(args) => render_documents(&cli, args),

    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;

      info!(
        "Configuration file created at {}. Edit it to customize rendering.",
        output.display()
      );
      Ok(())
    },

    Commands::ExportCss { output_dir, force } => {
      let written = Config::export_stylesheets(output_dir, *force)
        .wrap_err_with(|| {
          format!("Failed to export style sheets to {}", output_dir.display())
        })?;
      info!(
        "Exported {} style sheets to {}",
        written.len(),
        output_dir.display()
      );
      Ok(())
    },
  }
}

fn render_documents(cli: &Cli, args: &RenderArgs) -> Result<()> {
  let config = config::load(cli, args)?;
  info!("Output directory: {}", config.output_dir.display());

  let written = render::run(&config, &args.inputs)?;
  info!("Wrote {} files", written.len());
  Ok(())
}
