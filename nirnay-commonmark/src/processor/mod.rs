//! Markdown processing pipeline.
//!
//! # Architecture
//!
//! - [`core`]: the processor and the fixed order of the passes
//! - [`process`]: panic recovery and file-level entry points
//! - [`headings`]: annotation stripping, topic tagging and title lookup
//! - [`tables`]: table to grid rewriting
//! - [`sections`]: section containers and the index page break
//! - [`images`]: image attribute cleanup and figure wrapping
//! - [`types`]: options and the processor type
pub mod core;
pub mod headings;
pub mod images;
pub mod process;
pub mod sections;
pub mod tables;
pub mod types;

pub use process::{
  process_document,
  process_markdown_file,
  process_safe,
  process_with_recovery,
};
pub use types::{MarkdownOptions, MarkdownOptionsBuilder, MarkdownProcessor};
