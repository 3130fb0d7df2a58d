use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface for nirnay
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "nirnay: sectioned Markdown notes to paginated HTML and PDF"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times) Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(
    short = 'c',
    long = "config-file",
    global = true,
    action = clap::ArgAction::Append
  )]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the nirnay CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render Markdown files to HTML, and optionally PDF.
  Render(RenderArgs),

  /// Initialize a new nirnay configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "nirnay.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the built-in style sheets to a directory for customization.
  ExportCss {
    /// Output directory for the style sheets.
    #[arg(short, long, default_value = "styles")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

/// Arguments of the `render` subcommand. Every option left unset keeps the
/// value from the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
  /// Markdown files, or directories to search for `.md` and `.markdown`
  /// files.
  #[arg(required = true)]
  pub inputs: Vec<PathBuf>,

  /// Output directory for rendered files.
  #[arg(short, long)]
  pub output_dir: Option<PathBuf>,

  /// Also produce a PDF for every document.
  #[arg(long)]
  pub pdf: bool,

  /// Number of text columns on a page (1 or 2).
  #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
  pub columns: Option<u8>,

  /// Start the first topic on a new page, after the index.
  #[arg(long)]
  pub page_break_after_index: bool,

  /// Leave images unwrapped instead of placing them in figures.
  #[arg(long)]
  pub no_figures: bool,

  /// Minify the generated HTML.
  #[arg(long)]
  pub minify: bool,

  /// Browser binary used for PDF output.
  #[arg(long)]
  pub browser: Option<PathBuf>,

  /// Path to custom stylesheet (can be specified multiple times)
  #[arg(short, long, action = clap::ArgAction::Append)]
  pub stylesheet: Vec<PathBuf>,

  /// Number of threads to use for parallel processing.
  #[arg(short = 'p', long = "jobs")]
  pub jobs: Option<usize>,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
