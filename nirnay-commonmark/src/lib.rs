//! # nirnay-commonmark
//!
//! Turns loosely written study notes into a sectioned HTML body. Headings
//! from a fixed catalog ("The Context", "Key Analysis", "Way Forward", ...)
//! open colored section containers, other level-2 headings become topic
//! titles, and tables are flattened into two-column grids that reflow across
//! pages and columns.
//!
//! ## Quick Start
//!
//! ```rust
//! use nirnay_commonmark::{MarkdownOptions, MarkdownProcessor};
//!
//! let processor = MarkdownProcessor::new(MarkdownOptions::default());
//! let result = processor.render("# Daily Digest\n\n## Key Analysis\n\nText.");
//!
//! assert_eq!(result.title.as_deref(), Some("Daily Digest"));
//! assert!(result.html.contains("<div class=\"colorbox analysis\">"));
//! ```
//!
//! ## Pipeline
//!
//! 1. [`normalize`]: text fixes applied before parsing
//! 2. `comrak` parses the markdown into HTML
//! 3. [`processor`]: DOM passes for headings, tables, sections and images
//!
//! [`classify`] holds the heading catalog used by the section passes.
pub mod classify;
pub mod normalize;
pub mod processor;
mod types;
pub mod utils;

pub use crate::{
  classify::{SectionKind, classify_section, normalize_heading},
  processor::{
    MarkdownOptions,
    MarkdownOptionsBuilder,
    MarkdownProcessor,
    process_document,
    process_markdown_file,
    process_with_recovery,
  },
  types::{Document, MarkdownResult, Section},
};
