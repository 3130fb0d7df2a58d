use std::fs;

use color_eyre::eyre::{Context, Result};
use html_escape::encode_text;
use log::debug;
use nirnay_commonmark::{MarkdownOptions, MarkdownResult};
use nirnay_config::{Config, PostprocessConfig};
use nirnay_templates as templates;
use tera::Tera;

use crate::postprocess::process_html;

const PAGE_TEMPLATE_NAME: &str = "page";

/// Renders transformed markdown bodies into complete, self-contained pages.
///
/// The template and the style sheet are prepared once, so one renderer can
/// serve a whole batch.
#[derive(Debug)]
pub struct PageRenderer {
  tera:        Tera,
  stylesheet:  String,
  postprocess: PostprocessConfig,
}

impl PageRenderer {
  /// Build a renderer for the given configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the page template fails to parse or a configured
  /// style sheet cannot be read.
  pub fn new(config: &Config) -> Result<Self> {
    let mut tera = Tera::default();
    // No `.html` suffix on the name, so tera does not autoescape the body
    tera
      .add_raw_template(PAGE_TEMPLATE_NAME, templates::PAGE_TEMPLATE)
      .wrap_err("Failed to parse the page template")?;

    Ok(Self {
      tera,
      stylesheet: build_stylesheet(config)?,
      postprocess: config.postprocess.clone().unwrap_or_default(),
    })
  }

  /// The complete style sheet embedded in every page.
  #[must_use]
  pub fn stylesheet(&self) -> &str {
    &self.stylesheet
  }

  /// Render a page for a transformed body. `fallback_name` is used for the
  /// title when the body has no level-1 heading.
  ///
  /// # Errors
  ///
  /// Returns an error if the template cannot be rendered.
  pub fn render(
    &self,
    result: &MarkdownResult,
    fallback_name: &str,
  ) -> Result<String> {
    let title = document_title(result, fallback_name);

    let mut ctx = tera::Context::new();
    ctx.insert("title", &encode_text(&title));
    ctx.insert("stylesheet", &self.stylesheet);
    ctx.insert("content", &result.html);

    let html = self
      .tera
      .render(PAGE_TEMPLATE_NAME, &ctx)
      .wrap_err_with(|| format!("Failed to render page '{title}'"))?;

    debug!("Rendered page '{title}' ({} bytes)", html.len());
    Ok(process_html(&html, &self.postprocess))
  }
}

/// Page title: the first level-1 heading, or the fallback name, upper-cased.
#[must_use]
pub fn document_title(result: &MarkdownResult, fallback_name: &str) -> String {
  result
    .title
    .as_deref()
    .filter(|title| !title.trim().is_empty())
    .unwrap_or(fallback_name)
    .to_uppercase()
}

/// Processor options for a configuration's layout.
#[must_use]
pub const fn markdown_options(config: &Config) -> MarkdownOptions {
  MarkdownOptions {
    figure_wrapping:        config.layout.figure_wrapping,
    page_break_after_index: config.layout.page_break_after_index,
    gfm:                    true,
  }
}

/// Base sheet, then the layout sheet, then every user sheet in order.
fn build_stylesheet(config: &Config) -> Result<String> {
  let mut stylesheet = String::from(templates::BASE_CSS);
  stylesheet.push('\n');
  stylesheet.push_str(templates::layout_css(config.layout.columns));

  for path in &config.stylesheet_paths {
    let custom = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read stylesheet: {}", path.display())
    })?;
    stylesheet.push('\n');
    stylesheet.push_str(&custom);
  }

  Ok(stylesheet)
}
