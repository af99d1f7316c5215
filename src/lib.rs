//! Best-effort structuring of free-form résumé text
//!
//! [`processing::segment`] splits a document into canonical sections,
//! [`processing::parse_resume`] extracts typed entries from them and
//! [`processing::synthesize`] completes a résumé against a job description.
//! Nothing in the pipeline fails on malformed text; errors only come from file,
//! configuration and output handling.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{CvError, Result};
pub use output::render_markdown;
pub use processing::{parse_resume, segment, synthesize, CanonicalSection, Resume, SectionedDocument};
