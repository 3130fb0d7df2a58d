pub mod dom;

use regex::Regex;

/// Error type for utility operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
  #[error("Regex compilation failed: {0}")]
  RegexError(#[from] regex::Error),
}

/// Result type for utility operations.
pub type UtilResult<T> = Result<T, UtilError>;

/// Compile a regex, or log the failure and fall back to a regex that never
/// matches. Used for the static patterns of the normalizer and classifier so
/// that a bad pattern degrades to "rule does not apply" instead of a panic.
#[must_use]
pub fn compile_or_never(name: &str, pattern: &str) -> Regex {
  try_compile(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex()
  })
}

/// Compile a regex pattern.
///
/// # Errors
///
/// Returns an error if the pattern is not a valid regular expression.
pub fn try_compile(pattern: &str) -> UtilResult<Regex> {
  Ok(Regex::new(pattern)?)
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(
      clippy::unwrap_used,
      reason = "This pattern is guaranteed to be valid"
    )]
    Regex::new(r"^\b$").unwrap()
  })
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing
/// them.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> String {
  let mut out = String::with_capacity(bytes.len());
  for chunk in bytes.utf8_chunks() {
    out.push_str(chunk.valid());
  }
  out
}

/// Collapse every run of whitespace into a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
