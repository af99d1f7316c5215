//! Text processing: segmentation, entity extraction and synthesis

pub mod contact;
pub mod education;
pub mod experience;
pub mod normalizer;
pub mod patterns;
pub mod resume;
pub mod sections;
pub mod segmenter;
pub mod skills;
pub mod synthesizer;
pub mod vocabulary;

pub use resume::{parse_resume, Resume, ResumeParser};
pub use sections::{resolve_section, CanonicalSection};
pub use segmenter::{segment, SectionKey, SectionedDocument, Segmenter};
pub use synthesizer::{synthesize, Synthesizer};
