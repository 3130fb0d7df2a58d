use std::{env, fs, io, path::Path};

use log::debug;
use tempfile::Builder;

use crate::{error::PdfError, rasterizer::Rasterizer};

const WORKDIR_PREFIX: &str = "nirnay-";
const HTML_NAME: &str = "doc.html";
const PDF_NAME: &str = "doc.pdf";

/// Rasterize a finished HTML page into PDF bytes.
///
/// The page is written into a fresh temporary directory under the system
/// temporary directory, which is removed again on every exit path.
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the working directory cannot be prepared, and
/// whatever the rasterizer reports otherwise. A missing or empty output file
/// is a [`PdfError::Rasterize`].
pub fn render_pdf(
  html: &str,
  rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, PdfError> {
  render_pdf_in(&env::temp_dir(), html, rasterizer)
}

/// [`render_pdf`], with the temporary working directory created inside
/// `parent`.
///
/// # Errors
///
/// See [`render_pdf`].
pub fn render_pdf_in(
  parent: &Path,
  html: &str,
  rasterizer: &dyn Rasterizer,
) -> Result<Vec<u8>, PdfError> {
  let workdir = Builder::new().prefix(WORKDIR_PREFIX).tempdir_in(parent)?;
  let html_path = workdir.path().join(HTML_NAME);
  let pdf_path = workdir.path().join(PDF_NAME);
  debug!("Rasterizing in {}", workdir.path().display());

  fs::write(&html_path, html)?;
  rasterizer.rasterize(&html_path, &pdf_path)?;

  let bytes = match fs::read(&pdf_path) {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      return Err(PdfError::Rasterize(
        "the engine finished without writing a PDF".to_string(),
      ));
    },
    Err(e) => return Err(e.into()),
  };

  if bytes.is_empty() {
    return Err(PdfError::Rasterize(
      "the engine wrote an empty PDF".to_string(),
    ));
  }

  debug!("Rasterized {} bytes of PDF", bytes.len());
  Ok(bytes)
}
