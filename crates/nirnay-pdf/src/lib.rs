//! PDF output for nirnay pages.
//!
//! A finished HTML page is handed to a headless browser, which prints it to
//! PDF. Page geometry and background printing come from the page's own style
//! sheet, so the browser only needs to be told where the files are.
//!
//! The engine is located once per process with [`ensure_engine`]; each call
//! to [`render_pdf`] then runs in its own temporary directory.
pub mod engine;
pub mod error;
pub mod rasterizer;
pub mod render;

pub use engine::ensure_engine;
pub use error::PdfError;
pub use rasterizer::{ChromiumRasterizer, Rasterizer};
pub use render::{render_pdf, render_pdf_in};
