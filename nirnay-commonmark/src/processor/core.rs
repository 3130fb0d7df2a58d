//! Core implementation of the Markdown processor.
//!
//! The pipeline is strictly sequential: normalize the text, parse it with
//! comrak, then run the DOM passes over the rendered body in a fixed order.
//! Each pass consumes the whole tree before the next one starts.
use comrak::{Arena, options::Options, parse_document};
use log::{debug, trace, warn};

use super::{
  headings::{
    document_title,
    remove_hash_only_paragraphs,
    strip_heading_annotations,
    tag_topic_titles,
  },
  images::normalize_images,
  process::process_safe,
  sections::{insert_index_page_break, wrap_sections},
  tables::rewrite_tables,
  types::{MarkdownOptions, MarkdownProcessor},
};
use crate::{
  normalize::normalize_markdown,
  types::MarkdownResult,
  utils::dom::{body_of, parse_fragment, serialize_children},
};

impl MarkdownProcessor {
  /// Create a new `MarkdownProcessor` with the given options.
  #[must_use]
  pub const fn new(options: MarkdownOptions) -> Self {
    Self { options }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &MarkdownOptions {
    &self.options
  }

  /// Render Markdown to the transformed HTML body, collecting the title,
  /// sections and topic titles on the way.
  #[must_use]
  pub fn render(&self, markdown: &str) -> MarkdownResult {
    let normalized = normalize_markdown(markdown);
    let html = self.convert_to_html(&normalized);
    self.transform_html(&html)
  }

  /// Parse normalized markdown and render it to plain HTML.
  #[must_use]
  pub fn convert_to_html(&self, content: &str) -> String {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, content, &options);

    let mut html_output = String::new();
    if let Err(e) = comrak::format_html(root, &options, &mut html_output) {
      warn!("Failed to format markdown as HTML: {e}");
    }
    html_output
  }

  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    // Tables are always on, the grid rewriter depends on them
    options.extension.table = true;
    if self.options.gfm {
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
      options.extension.footnotes = true;
    }
    options.render.r#unsafe = true;
    options.extension.header_id_prefix = None;
    options
  }

  /// Run the DOM passes over rendered HTML. A panic inside a pass falls back
  /// to the untransformed HTML.
  #[must_use]
  pub fn transform_html(&self, html: &str) -> MarkdownResult {
    if html.trim().is_empty() {
      return MarkdownResult::default();
    }

    process_safe(
      "DOM transformation",
      || self.apply_dom_transformations(html),
      || {
        MarkdownResult {
          html: html.to_string(),
          ..Default::default()
        }
      },
    )
  }

  fn apply_dom_transformations(&self, html: &str) -> MarkdownResult {
    let document = parse_fragment(html);
    let body = body_of(&document);

    let stray = remove_hash_only_paragraphs(&body);
    strip_heading_annotations(&body);
    let tables = rewrite_tables(&body);
    let topics = tag_topic_titles(&body);
    let sections = wrap_sections(&body);
    let page_break =
      self.options.page_break_after_index && insert_index_page_break(&body);
    let figures = normalize_images(&body, self.options.figure_wrapping);

    debug!(
      "Transformed document: {} sections, {} topics, {tables} tables, \
       {figures} figures",
      sections.len(),
      topics.len()
    );
    trace!("Removed {stray} stray paragraphs, page break: {page_break}");

    MarkdownResult {
      html: serialize_children(&body),
      title: document_title(&body),
      sections,
      topics,
    }
  }
}
