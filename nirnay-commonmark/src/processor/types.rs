//! Type definitions for the Markdown processor.
//!
//! # Examples
//!
//! ```
//! use nirnay_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let options = MarkdownOptions {
//!   page_break_after_index: true,
//!   ..Default::default()
//! };
//!
//! let processor = MarkdownProcessor::new(options);
//! ```

/// Options for configuring the Markdown processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
  /// Wrap images in `figure.img-figure` containers.
  pub figure_wrapping: bool,

  /// Insert a page break before the first topic title, ending the index
  /// page.
  pub page_break_after_index: bool,

  /// Enable the GFM extensions beyond tables (strikethrough, autolinks, task
  /// lists). Tables are always enabled.
  pub gfm: bool,
}

impl Default for MarkdownOptions {
  fn default() -> Self {
    Self {
      figure_wrapping:        true,
      page_break_after_index: false,
      gfm:                    true,
    }
  }
}

/// Main Markdown processor.
///
/// Holds no per-document state; one instance can render any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownProcessor {
  pub(crate) options: MarkdownOptions,
}

/// Builder for constructing `MarkdownOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptionsBuilder {
  options: MarkdownOptions,
}

impl MarkdownOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable figure wrapping of images.
  #[must_use]
  pub const fn figure_wrapping(mut self, enabled: bool) -> Self {
    self.options.figure_wrapping = enabled;
    self
  }

  /// Enable or disable the page break after the index.
  #[must_use]
  pub const fn page_break_after_index(mut self, enabled: bool) -> Self {
    self.options.page_break_after_index = enabled;
    self
  }

  /// Enable or disable the extra GFM extensions.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Build the final `MarkdownOptions`.
  #[must_use]
  pub fn build(self) -> MarkdownOptions {
    self.options
  }
}
