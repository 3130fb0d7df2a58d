pub mod postprocess;
pub mod template;

pub use template::{PageRenderer, document_title, markdown_options};
