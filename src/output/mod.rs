//! Rendering of structured résumés

pub mod formatter;
pub mod markdown;

pub use formatter::{formatter_for, resolve_save_path, save_output_to_file, suggest_filename, OutputFormatter};
pub use markdown::render_markdown;
