//! Heading classification.
//!
//! Maps heading display text onto the closed catalog of section tags. The
//! catalog is an ordered list of `(needles, tag)` pairs evaluated top to
//! bottom; the first entry with a needle contained in the normalized heading
//! wins. It is intentionally not extensible at runtime.
use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::{collapse_whitespace, compile_or_never};

/// Semantic section tag of a recognized heading.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
  Syllabus,
  Context,
  Analysis,
  Beyond,
  WayForward,
  Prelims,
  Exercise,
  Mains,
  Recall,
  Recap,
}

impl SectionKind {
  /// Every section kind, in catalog order.
  pub const ALL: [Self; 10] = [
    Self::Syllabus,
    Self::Context,
    Self::Analysis,
    Self::Beyond,
    Self::WayForward,
    Self::Prelims,
    Self::Exercise,
    Self::Mains,
    Self::Recall,
    Self::Recap,
  ];

  /// CSS class used on the section container.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Syllabus => "syllabus",
      Self::Context => "context",
      Self::Analysis => "analysis",
      Self::Beyond => "beyond",
      Self::WayForward => "wayforward",
      Self::Prelims => "prelims",
      Self::Exercise => "exercise",
      Self::Mains => "mains",
      Self::Recall => "recall",
      Self::Recap => "recap",
    }
  }
}

impl fmt::Display for SectionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

const SECTION_CATALOG: &[(&[&str], SectionKind)] = &[
  (&["syllabus mapping"], SectionKind::Syllabus),
  (&["the context", "why in news"], SectionKind::Context),
  (&["key analysis"], SectionKind::Analysis),
  (
    &["beyond the news", "faculty value addition", "value addition"],
    SectionKind::Beyond,
  ),
  (&["way forward"], SectionKind::WayForward),
  (&["prelims pointers", "prelims pointer"], SectionKind::Prelims),
  (&["exercise"], SectionKind::Exercise),
  (&["mains practice question"], SectionKind::Mains),
  (&["recall"], SectionKind::Recall),
  (&["recap"], SectionKind::Recap),
];

// `#id`, `.class`, `key=value` or a bare `-`
const ATTRIBUTE: &str = r"(?:[#.][^\s{}]+|[\w-]+=[^\s{}]*|-)";

static TRAILING_ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never(
    "TRAILING_ANNOTATION_RE",
    &format!(r"\s*\{{\s*{ATTRIBUTE}(?:\s+{ATTRIBUTE})*\s*\}}\s*$"),
  )
});

static ORDINAL_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never(
    "ORDINAL_MARKER_RE",
    r"(?i)^\(?\s*(\d{1,2}|[ivxlcdm]{1,6})\s*[.):\-]\s*",
  )
});

/// Remove a trailing attribute annotation such as `{#id .class}` from heading
/// text. Braces holding anything else are ordinary text and stay.
#[must_use]
pub fn strip_annotation(text: &str) -> String {
  TRAILING_ANNOTATION_RE.replace(text, "").into_owned()
}

/// Build the comparison key for a heading: whitespace collapsed, trailing
/// attribute annotation and leading ordinal marker (`1.`, `(ii)`, `IV:`)
/// removed, lowercased.
#[must_use]
pub fn normalize_heading(text: &str) -> String {
  let collapsed = collapse_whitespace(text);
  let without_annotation = strip_annotation(&collapsed);
  let without_ordinal = ORDINAL_MARKER_RE.replace(&without_annotation, "");
  without_ordinal.trim().to_lowercase()
}

/// Classify heading text against the section catalog.
#[must_use]
pub fn classify_section(title: &str) -> Option<SectionKind> {
  let key = normalize_heading(title);
  SECTION_CATALOG
    .iter()
    .find(|(needles, _)| needles.iter().any(|needle| key.contains(needle)))
    .map(|&(_, kind)| kind)
}

/// A level-2 heading with text that matches no section is a topic title.
#[must_use]
pub fn is_topic_title(level: u8, text: &str) -> bool {
  level == 2 && !text.trim().is_empty() && classify_section(text).is_none()
}
