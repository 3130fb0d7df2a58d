use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::info;

/// A finished file waiting to be written: its file name and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  pub name:  String,
  pub bytes: Vec<u8>,
}

impl Artifact {
  #[must_use]
  pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
    Self {
      name:  name.into(),
      bytes: bytes.into(),
    }
  }
}

/// Write artifacts into `output_dir`, creating it if needed. Existing files
/// are replaced.
///
/// # Errors
///
/// Returns an error if an artifact name is not a plain file name, or if a
/// file cannot be written.
pub fn deliver(
  output_dir: &Path,
  artifacts: &[Artifact],
) -> Result<Vec<PathBuf>> {
  for artifact in artifacts {
    if !is_plain_file_name(&artifact.name) {
      bail!("Refusing to write artifact with name '{}'", artifact.name);
    }
  }

  fs::create_dir_all(output_dir).wrap_err_with(|| {
    format!("Failed to create output directory: {}", output_dir.display())
  })?;

  let mut written = Vec::with_capacity(artifacts.len());
  for artifact in artifacts {
    let path = output_dir.join(&artifact.name);
    fs::write(&path, &artifact.bytes)
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    written.push(path);
  }

  Ok(written)
}

fn is_plain_file_name(name: &str) -> bool {
  !name.is_empty()
    && name != "."
    && name != ".."
    && !name.contains(['/', '\\'])
}
