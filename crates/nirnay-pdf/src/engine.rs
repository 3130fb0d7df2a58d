//! Browser engine discovery.
//!
//! The engine is resolved once per process. Resolution order:
//!
//! 1. the explicitly configured binary,
//! 2. the `NIRNAY_BROWSER` environment variable,
//! 3. the first of [`CANDIDATES`] found on `PATH`.
//!
//! A configured value with a single path component (`chromium`) is looked up
//! on `PATH`, anything else must point at an existing file.
use std::{
  env,
  ffi::OsStr,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use log::{debug, info};

use crate::error::PdfError;

/// Environment variable naming the browser binary.
pub const BROWSER_ENV: &str = "NIRNAY_BROWSER";

/// Browser binaries tried on `PATH`, in order.
pub const CANDIDATES: &[&str] = &[
  "chromium",
  "chromium-browser",
  "google-chrome",
  "google-chrome-stable",
  "chrome",
  "msedge",
];

static RESOLVED_ENGINE: OnceLock<PathBuf> = OnceLock::new();

/// Resolve the browser engine, caching the result for the rest of the
/// process. Later calls return the cached path without searching again,
/// whatever `explicit` is.
///
/// # Errors
///
/// Returns [`PdfError::EngineUnavailable`] if no browser can be found.
pub fn ensure_engine(explicit: Option<&Path>) -> Result<PathBuf, PdfError> {
  if let Some(path) = RESOLVED_ENGINE.get() {
    debug!("Using cached PDF engine: {}", path.display());
    return Ok(path.clone());
  }

  let from_env = env::var_os(BROWSER_ENV)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from);
  let path_var = env::var_os("PATH");

  let path =
    resolve_engine(explicit.or(from_env.as_deref()), path_var.as_deref())?;
  info!("Using PDF engine: {}", path.display());

  // Another thread may have won the race, both results are equivalent
  Ok(RESOLVED_ENGINE.get_or_init(|| path).clone())
}

/// Resolve an engine without touching the process-wide cache.
///
/// # Errors
///
/// Returns [`PdfError::EngineUnavailable`] if the configured binary does not
/// exist, or if nothing suitable is found on `path_var`.
pub fn resolve_engine(
  configured: Option<&Path>,
  path_var: Option<&OsStr>,
) -> Result<PathBuf, PdfError> {
  if let Some(configured) = configured {
    if configured.components().count() > 1 {
      return if configured.is_file() {
        Ok(configured.to_path_buf())
      } else {
        Err(PdfError::EngineUnavailable(format!(
          "configured browser does not exist: {}",
          configured.display()
        )))
      };
    }

    let name = configured.as_os_str();
    return find_in_path(name, path_var).ok_or_else(|| {
      PdfError::EngineUnavailable(format!(
        "configured browser '{}' was not found on PATH",
        configured.display()
      ))
    });
  }

  CANDIDATES
    .iter()
    .find_map(|name| find_in_path(OsStr::new(name), path_var))
    .ok_or_else(|| {
      PdfError::EngineUnavailable(format!(
        "none of {} was found on PATH",
        CANDIDATES.join(", ")
      ))
    })
}

/// First file called `name` in the directories of `path_var`.
#[must_use]
pub fn find_in_path(
  name: &OsStr,
  path_var: Option<&OsStr>,
) -> Option<PathBuf> {
  let path_var = path_var?;
  env::split_paths(path_var).find_map(|dir| {
    let candidate = dir.join(name);
    if candidate.is_file() {
      return Some(candidate);
    }
    if cfg!(windows) {
      let candidate = candidate.with_extension("exe");
      if candidate.is_file() {
        return Some(candidate);
      }
    }
    None
  })
}
