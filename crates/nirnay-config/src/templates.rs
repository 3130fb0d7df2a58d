use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration in TOML, commented so that a fresh file explains
/// itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# nirnay configuration file

# Directory the rendered files are written to
output_dir = "out"

# Appended to the input file stem: notes.md -> notes_nirnay.html
file_suffix = "_nirnay"

# Extra style sheets, appended after the built-in ones
# stylesheet_paths = ["custom.css"]

# Number of documents rendered in parallel (defaults to number of CPU cores)
# jobs = 4

[layout]
# 1 or 2 text columns
columns = 2

# Start the first topic on a new page
page_break_after_index = false

# Wrap images in figure containers
figure_wrapping = true

[pdf]
# Also produce a PDF through headless Chromium
enable = false

# Browser binary, looked up on PATH when unset
# browser = "/usr/bin/chromium"

# Rasterization scale, higher is sharper
device_scale_factor = 2.0

# Virtual time in milliseconds for the page to settle before printing
settle_time_ms = 5000

[postprocess]
# Minify the HTML output
minify_html = false

[postprocess.html]
remove_comments = true
"#;

/// Default configuration in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "output_dir": "out",
  "file_suffix": "_nirnay",
  "stylesheet_paths": [],
  "layout": {
    "columns": 2,
    "page_break_after_index": false,
    "figure_wrapping": true
  },
  "pdf": {
    "enable": false,
    "device_scale_factor": 2.0,
    "settle_time_ms": 5000
  },
  "postprocess": {
    "minify_html": false,
    "html": {
      "remove_comments": true
    }
  }
}
"#;

/// Get the default configuration for a format.
///
/// # Errors
///
/// Returns an error if the format is neither `toml` nor `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
