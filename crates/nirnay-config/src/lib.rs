pub mod config;
pub mod error;
pub mod layout;
pub mod overrides;
pub mod pdf;
pub mod postprocess;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
pub use layout::LayoutConfig;
pub use pdf::PdfConfig;
pub use postprocess::PostprocessConfig;
