use std::{
  ffi::OsString,
  io,
  path::{Path, PathBuf},
  process::Command,
};

use log::debug;
use nirnay_config::PdfConfig;

use crate::{engine::ensure_engine, error::PdfError};

/// Turns a finished HTML file into a PDF file.
///
/// Implementations block until the PDF is written or the attempt failed.
pub trait Rasterizer {
  /// Rasterize `html_path` into `pdf_path`.
  ///
  /// # Errors
  ///
  /// Returns [`PdfError::Rasterize`] with the engine's diagnostic on failure.
  fn rasterize(
    &self,
    html_path: &Path,
    pdf_path: &Path,
  ) -> Result<(), PdfError>;
}

/// Headless Chromium (or a compatible browser) printing to PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct ChromiumRasterizer {
  binary:              PathBuf,
  device_scale_factor: f64,
  settle_time_ms:      u64,
}

impl ChromiumRasterizer {
  /// A rasterizer driving `binary` with the default settings.
  #[must_use]
  pub fn new(binary: impl Into<PathBuf>) -> Self {
    let defaults = PdfConfig::default();
    Self {
      binary:              binary.into(),
      device_scale_factor: defaults.device_scale_factor,
      settle_time_ms:      defaults.settle_time_ms,
    }
  }

  /// Resolve the engine for a configuration and build a rasterizer for it.
  ///
  /// # Errors
  ///
  /// Returns [`PdfError::EngineUnavailable`] if no browser can be found.
  pub fn from_config(config: &PdfConfig) -> Result<Self, PdfError> {
    let binary = ensure_engine(config.browser.as_deref())?;
    Ok(
      Self::new(binary)
        .with_device_scale_factor(config.device_scale_factor)
        .with_settle_time_ms(config.settle_time_ms),
    )
  }

  #[must_use]
  pub const fn with_device_scale_factor(mut self, factor: f64) -> Self {
    self.device_scale_factor = factor;
    self
  }

  #[must_use]
  pub const fn with_settle_time_ms(mut self, millis: u64) -> Self {
    self.settle_time_ms = millis;
    self
  }

  #[must_use]
  pub fn binary(&self) -> &Path {
    &self.binary
  }

  /// Command line arguments for one print job.
  #[must_use]
  pub fn args(&self, html_path: &Path, pdf_path: &Path) -> Vec<OsString> {
    let mut print_to = OsString::from("--print-to-pdf=");
    print_to.push(pdf_path);

    vec![
      "--headless=new".into(),
      "--disable-gpu".into(),
      "--no-sandbox".into(),
      "--hide-scrollbars".into(),
      "--no-pdf-header-footer".into(),
      "--run-all-compositor-stages-before-draw".into(),
      format!("--virtual-time-budget={}", self.settle_time_ms).into(),
      format!("--force-device-scale-factor={}", self.device_scale_factor)
        .into(),
      print_to,
      file_url(html_path).into(),
    ]
  }
}

impl Rasterizer for ChromiumRasterizer {
  fn rasterize(
    &self,
    html_path: &Path,
    pdf_path: &Path,
  ) -> Result<(), PdfError> {
    let args = self.args(html_path, pdf_path);
    debug!("Running {} {args:?}", self.binary.display());

    let output =
      Command::new(&self.binary).args(&args).output().map_err(|e| {
        let msg = format!("failed to launch {}: {e}", self.binary.display());
        if e.kind() == io::ErrorKind::NotFound {
          PdfError::EngineUnavailable(msg)
        } else {
          PdfError::Rasterize(msg)
        }
      })?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(PdfError::Rasterize(format!(
        "{} exited with {}: {}",
        self.binary.display(),
        output.status,
        stderr.trim()
      )));
    }

    Ok(())
  }
}

/// `file://` URL for an absolute path, with characters outside the
/// unreserved set percent-encoded.
fn file_url(path: &Path) -> String {
  const HEX: &[u8; 16] = b"0123456789ABCDEF";

  let raw = path.to_string_lossy();
  let raw = raw.replace('\\', "/");
  let mut url = String::from("file://");
  if !raw.starts_with('/') {
    url.push('/');
  }
  for byte in raw.bytes() {
    if byte.is_ascii_alphanumeric() || b"/-._~:".contains(&byte) {
      url.push(char::from(byte));
    } else {
      url.push('%');
      url.push(char::from(HEX[usize::from(byte >> 4)]));
      url.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
  }
  url
}
