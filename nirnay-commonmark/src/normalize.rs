//! Markdown pre-processing.
//!
//! Fixes the structural edge cases of hand-written study notes before they
//! reach the parser. Every rule is a plain text rewrite: input that matches no
//! rule passes through unchanged.
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::compile_or_never;

static HEADING_ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never(
    "HEADING_ANNOTATION_RE",
    r"(?m)^([ \t]{0,3}#{1,6}[ \t]+.*?)([ \t]*)\{[^{}\\\n]*\}[ \t]*$",
  )
});

static EMPTY_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("EMPTY_HEADING_RE", r"(?m)^[ \t]*#{1,6}[ \t]*(?:\n|$)")
});

static ESCAPED_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("ESCAPED_PUNCT_RE", r"\\([\\`*_{}\[\]()#+\-.!|>~])")
});

static TABLE_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("TABLE_ROW_RE", r"^\s*\|.*\|\s*$")
});

static DASH_RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("DASH_RULE_RE", r"^ {0,3}(?:-[ \t]*){3,}$")
});

static ATX_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("ATX_HEADING_RE", r"^\s*#{1,6}\s+\S")
});

/// Run every normalization rule, in order.
#[must_use]
pub fn normalize_markdown(content: &str) -> String {
  let processed = normalize_line_endings(content);
  let processed = strip_heading_annotations(&processed);
  let processed = remove_empty_headings(&processed);
  let processed = unescape_punctuation(&processed);
  let processed = separate_tables_from_headings(&processed);
  separate_rules_from_paragraphs(&processed)
}

/// Convert CRLF and lone CR line endings to LF.
#[must_use]
pub fn normalize_line_endings(content: &str) -> String {
  if content.contains('\r') {
    content.replace("\r\n", "\n").replace('\r', "\n")
  } else {
    content.to_string()
  }
}

/// Drop a trailing `{...}` attribute annotation from ATX heading lines.
/// Escaped braces (`\{`, `\}`) are literal text and never start or end one.
#[must_use]
pub fn strip_heading_annotations(content: &str) -> String {
  HEADING_ANNOTATION_RE
    .replace_all(content, |caps: &Captures| {
      let heading = &caps[1];
      if caps[2].is_empty() && heading.ends_with('\\') {
        caps[0].to_string()
      } else {
        heading.to_string()
      }
    })
    .into_owned()
}

/// Delete lines consisting only of one to six hash marks.
#[must_use]
pub fn remove_empty_headings(content: &str) -> String {
  EMPTY_HEADING_RE.replace_all(content, "").into_owned()
}

/// Unescape backslash-escaped markdown punctuation.
#[must_use]
pub fn unescape_punctuation(content: &str) -> String {
  ESCAPED_PUNCT_RE.replace_all(content, "$1").into_owned()
}

/// Insert a blank line after a pipe table row when the next line is a
/// heading, so the parser does not fold the heading into the table.
#[must_use]
pub fn separate_tables_from_headings(content: &str) -> String {
  let lines: Vec<&str> = content.lines().collect();
  let mut out = String::with_capacity(content.len() + 16);

  for (i, line) in lines.iter().enumerate() {
    out.push_str(line);
    out.push('\n');
    if TABLE_ROW_RE.is_match(line)
      && let Some(next) = lines.get(i + 1)
      && !next.trim().is_empty()
      && ATX_HEADING_RE.is_match(next)
    {
      out.push('\n');
    }
  }

  if !content.ends_with('\n') {
    out.pop();
  }
  out
}

/// Insert a blank line before a dash-only line that directly follows text,
/// so it parses as a thematic break instead of a setext heading underline.
/// Fenced code is left alone.
#[must_use]
pub fn separate_rules_from_paragraphs(content: &str) -> String {
  let mut out = String::with_capacity(content.len() + 16);
  let mut previous_blank = true;
  let mut in_fence = false;

  for line in content.lines() {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
      in_fence = !in_fence;
    }
    if !in_fence && !previous_blank && DASH_RULE_RE.is_match(line) {
      out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    previous_blank = line.trim().is_empty();
  }

  if !content.ends_with('\n') {
    out.pop();
  }
  out
}
