use std::io;

use thiserror::Error;

/// Setup hint shown when no browser engine can be found.
pub const ENGINE_GUIDANCE: &str =
  "Install Chromium or Google Chrome, or point `pdf.browser` (or the \
   NIRNAY_BROWSER environment variable) at a browser binary.";

/// Error type for nirnay-pdf operations
#[derive(Debug, Error)]
pub enum PdfError {
  /// No usable browser engine. Carries what was looked for.
  #[error("PDF engine unavailable: {0}")]
  EngineUnavailable(String),

  /// The engine ran but did not produce a PDF.
  #[error("PDF rasterizing failed: {0}")]
  Rasterize(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
}

impl PdfError {
  /// Setup guidance for errors the user can fix by installing something.
  #[must_use]
  pub const fn suggestion(&self) -> Option<&'static str> {
    match self {
      Self::EngineUnavailable(_) => Some(ENGINE_GUIDANCE),
      Self::Rasterize(_) | Self::Io(_) => None,
    }
  }
}
