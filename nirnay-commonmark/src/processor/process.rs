//! High-level processing functions with error recovery.
use std::{fs, io, path::Path};

use log::error;

use super::types::MarkdownProcessor;
use crate::types::{Document, MarkdownResult};

/// Run `processor_fn`, recovering from a panic by logging it and returning
/// `fallback()` instead.
///
/// None of the transformation stages are expected to panic. This keeps a
/// malformed document from taking down a whole batch if one does.
pub fn process_safe<T, F, G>(stage: &str, processor_fn: F, fallback: G) -> T
where
  F: FnOnce() -> T,
  G: FnOnce() -> T,
{
  let result =
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(processor_fn));

  match result {
    Ok(value) => value,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Error during {stage}: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Error during {stage}: {error_msg}");
      } else {
        error!("Unknown error occurred during {stage}");
      }
      fallback()
    },
  }
}

/// Process markdown content with error recovery.
///
/// A panic anywhere in the pipeline yields an empty result holding an error
/// notice instead of the transformed body.
#[must_use]
pub fn process_with_recovery(
  processor: &MarkdownProcessor,
  content: &str,
) -> MarkdownResult {
  process_safe(
    "markdown processing",
    || processor.render(content),
    || {
      MarkdownResult {
        html: "<div class=\"error\">Critical error processing markdown \
               content</div>"
          .to_string(),
        ..Default::default()
      }
    },
  )
}

/// Render a decoded document.
#[must_use]
pub fn process_document(
  processor: &MarkdownProcessor,
  document: &Document,
) -> MarkdownResult {
  process_with_recovery(processor, &document.text)
}

/// Read and render a markdown file. The file stem becomes the document's
/// fallback name.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn process_markdown_file(
  processor: &MarkdownProcessor,
  path: &Path,
) -> io::Result<(Document, MarkdownResult)> {
  let bytes = fs::read(path)?;
  let document = Document::from_named_bytes(&bytes, path);
  let result = process_document(processor, &document);
  Ok((document, result))
}
