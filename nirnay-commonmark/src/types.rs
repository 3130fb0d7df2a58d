//! Types for nirnay-commonmark public API and internal use.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{classify::SectionKind, utils::decode_lossy};

/// A markdown document as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  /// Decoded markdown text.
  pub text: String,

  /// Name used when the document has no level-1 heading, usually the stem
  /// of the uploaded file.
  pub fallback_name: String,
}

impl Document {
  /// Create a document from already decoded text.
  #[must_use]
  pub fn new(
    text: impl Into<String>,
    fallback_name: impl Into<String>,
  ) -> Self {
    Self {
      text:          text.into(),
      fallback_name: fallback_name.into(),
    }
  }

  /// Create a document from raw bytes. Invalid UTF-8 sequences are dropped.
  #[must_use]
  pub fn from_bytes(bytes: &[u8], fallback_name: impl Into<String>) -> Self {
    Self::new(decode_lossy(bytes), fallback_name)
  }

  /// Create a document from raw bytes and the file name they came from. The
  /// fallback name is the file stem.
  #[must_use]
  pub fn from_named_bytes(bytes: &[u8], file_name: &Path) -> Self {
    let stem = file_name
      .file_stem()
      .map_or_else(|| "document".into(), |s| s.to_string_lossy().into_owned());
    Self::from_bytes(bytes, stem)
  }
}

/// A section container created by the partitioner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
  /// Section tag of the container.
  pub kind:    SectionKind,
  /// Text of the heading that opened the container.
  pub heading: String,
}

/// Result of Markdown processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownResult {
  /// Transformed HTML body fragment.
  pub html: String,

  /// Text of the first level-1 heading, if any.
  pub title: Option<String>,

  /// Section containers, in document order.
  pub sections: Vec<Section>,

  /// Topic titles, in document order.
  pub topics: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_named_bytes_uses_stem() {
    let doc =
      Document::from_named_bytes(b"# Hi", Path::new("notes/2024-05-01.md"));
    assert_eq!(doc.fallback_name, "2024-05-01");
    assert_eq!(doc.text, "# Hi");
  }

  #[test]
  fn test_from_bytes_drops_invalid() {
    let doc = Document::from_bytes(b"ok\xc3(", "x");
    assert_eq!(doc.text, "ok(");
  }
}
