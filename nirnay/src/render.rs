//! Batch rendering: collect inputs, transform them in parallel, rasterize
//! sequentially, and hand the results to the output layer.
use std::{
  collections::HashSet,
  fs,
  path::{Path, PathBuf},
};

use color_eyre::{
  Section,
  eyre::{self, Context, Result, bail},
};
use log::{debug, info};
use nirnay_commonmark::{Document, MarkdownProcessor, process_document};
use nirnay_config::Config;
use nirnay_html::{PageRenderer, markdown_options};
use nirnay_pdf::{ChromiumRasterizer, PdfError, Rasterizer, render_pdf};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::output::{Artifact, deliver};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A document rendered to a complete HTML page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
  /// Markdown file the page was rendered from.
  pub source:   PathBuf,
  /// Input file stem, the base of every output name.
  pub stem:     String,
  pub html:     String,
  pub sections: usize,
  pub topics:   usize,
}

/// Whether a path looks like a markdown file.
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      MARKDOWN_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Expand inputs into the list of files to render. Files are taken as
/// given, directories are searched recursively for markdown files. The
/// result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an error if an input does not exist or a directory cannot be
/// read.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for input in inputs {
    if input.is_file() {
      files.push(input.clone());
    } else if input.is_dir() {
      for entry in WalkDir::new(input).follow_links(true) {
        let entry = entry.wrap_err_with(|| {
          format!("Failed to read directory: {}", input.display())
        })?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
          files.push(entry.into_path());
        }
      }
    } else {
      bail!("Input does not exist: {}", input.display());
    }
  }

  files.sort();
  files.dedup();
  debug!("Collected {} input files", files.len());
  Ok(files)
}

fn file_stem(path: &Path) -> String {
  path
    .file_stem()
    .map_or_else(|| "document".into(), |s| s.to_string_lossy().into_owned())
}

/// Output names are derived from file stems only, so two inputs with the same
/// stem would overwrite each other.
fn check_unique_stems(files: &[PathBuf]) -> Result<()> {
  let mut seen = HashSet::new();
  for path in files {
    if !seen.insert(file_stem(path)) {
      bail!(
        "More than one input is named '{}', outputs would overwrite each \
         other: {}",
        file_stem(path),
        path.display()
      );
    }
  }
  Ok(())
}

/// Render one markdown file to a page.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the page cannot be
/// assembled.
pub fn render_file(
  processor: &MarkdownProcessor,
  renderer: &PageRenderer,
  path: &Path,
) -> Result<RenderedPage> {
  let bytes = fs::read(path)
    .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
  let document = Document::from_named_bytes(&bytes, path);
  let result = process_document(processor, &document);
  let html = renderer
    .render(&result, &document.fallback_name)
    .wrap_err_with(|| format!("Failed to render {}", path.display()))?;

  debug!(
    "Rendered {}: {} sections, {} topics",
    path.display(),
    result.sections.len(),
    result.topics.len()
  );

  Ok(RenderedPage {
    source: path.to_path_buf(),
    stem: file_stem(path),
    html,
    sections: result.sections.len(),
    topics: result.topics.len(),
  })
}

/// Render every file to a page on a thread pool sized by `config.jobs`.
/// Pages come back in input order.
///
/// # Errors
///
/// Returns the first error any document produced.
pub fn render_pages(
  config: &Config,
  files: &[PathBuf],
) -> Result<Vec<RenderedPage>> {
  let processor = MarkdownProcessor::new(markdown_options(config));
  let renderer = PageRenderer::new(config)?;

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to build the thread pool")?;

  pool.install(|| {
    files
      .par_iter()
      .map(|path| render_file(&processor, &renderer, path))
      .collect()
  })
}

/// Turn a PDF error into a report, attaching setup guidance where there is
/// some.
fn pdf_report(err: PdfError) -> eyre::Report {
  let suggestion = err.suggestion();
  let report = eyre::Report::new(err);
  match suggestion {
    Some(suggestion) => report.suggestion(suggestion),
    None => report,
  }
}

/// Render the inputs and write the results. When PDF output is enabled the
/// browser engine is located before any work starts.
///
/// # Errors
///
/// Returns an error if no input is found, the engine is unavailable, or any
/// document fails to render or write.
pub fn run(config: &Config, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
  let rasterizer = if config.pdf.enable {
    Some(ChromiumRasterizer::from_config(&config.pdf).map_err(pdf_report)?)
  } else {
    None
  };

  run_with(
    config,
    inputs,
    rasterizer.as_ref().map(|r| r as &dyn Rasterizer),
  )
}

/// [`run`] with the rasterizer supplied by the caller. `None` skips PDF
/// output regardless of the configuration.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
  config: &Config,
  inputs: &[PathBuf],
  rasterizer: Option<&dyn Rasterizer>,
) -> Result<Vec<PathBuf>> {
  let files = collect_inputs(inputs)?;
  if files.is_empty() {
    bail!("No markdown files found in the given inputs");
  }
  check_unique_stems(&files)?;

  info!("Rendering {} documents", files.len());
  let pages = render_pages(config, &files)?;

  let mut artifacts = Vec::with_capacity(pages.len() * 2);
  for page in &pages {
    info!(
      "{} -> {} ({} sections, {} topics)",
      page.source.display(),
      config.output_path(&page.stem, "html").display(),
      page.sections,
      page.topics
    );
    artifacts.push(Artifact::new(
      config.output_name(&page.stem, "html"),
      page.html.as_bytes(),
    ));
  }

  // One browser at a time, each in its own scratch directory
  if let Some(rasterizer) = rasterizer {
    for page in &pages {
      let pdf = render_pdf(&page.html, rasterizer)
        .map_err(pdf_report)
        .wrap_err_with(|| {
          format!("Failed to produce a PDF for {}", page.source.display())
        })?;
      let name = config.output_name(&page.stem, "pdf");
      artifacts.push(Artifact::new(name, pdf));
    }
  }

  deliver(&config.output_dir, &artifacts)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_is_markdown() {
    assert!(is_markdown(Path::new("notes/day.md")));
    assert!(is_markdown(Path::new("day.MARKDOWN")));
    assert!(!is_markdown(Path::new("day.txt")));
    assert!(!is_markdown(Path::new("md")));
  }

  #[test]
  fn test_collect_inputs_walks_directories() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("week/1");
    fs::create_dir_all(&nested).expect("mkdir");
    fs::write(dir.path().join("b.md"), "# B").expect("write");
    fs::write(nested.join("a.markdown"), "# A").expect("write");
    fs::write(nested.join("notes.txt"), "skip").expect("write");
    let explicit = dir.path().join("plain.txt");
    fs::write(&explicit, "# Plain").expect("write");

    let files = collect_inputs(&[
      dir.path().to_path_buf(),
      explicit.clone(),
      dir.path().join("b.md"),
    ])
    .expect("collect");

    assert_eq!(files, vec![
      dir.path().join("b.md"),
      explicit,
      nested.join("a.markdown"),
    ]);
  }

  #[test]
  fn test_collect_inputs_missing() {
    let dir = TempDir::new().expect("tempdir");
    assert!(collect_inputs(&[dir.path().join("nope.md")]).is_err());
  }

  #[test]
  fn test_duplicate_stems_rejected() {
    let files = [PathBuf::from("a/notes.md"), PathBuf::from("b/notes.md")];
    assert!(check_unique_stems(&files).is_err());
    let files = [PathBuf::from("a/notes.md"), PathBuf::from("b/other.md")];
    assert!(check_unique_stems(&files).is_ok());
  }

  #[test]
  fn test_pdf_report_keeps_message() {
    let report = pdf_report(PdfError::Rasterize("exit 1".to_string()));
    assert!(report.to_string().contains("exit 1"));
    assert!(
      PdfError::EngineUnavailable(String::new())
        .suggestion()
        .is_some()
    );
  }
}
