//! docx-extract: text and image extraction for .docx files
//!
//! This library decodes a Word document payload, stages its embedded images
//! in a call-scoped workspace, and streams back every image followed by the
//! document text.

pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod media_type;
pub mod message;

/// Output format options for the command-line host
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Extracted text followed by a summary line per image
    #[default]
    Text,
    /// One JSON message per line
    Json,
}

// Re-export commonly used types
pub use config::ExtractorConfig;
pub use document::{DocumentPayload, ExtractedAsset, ImageAsset, WORD_MIME_TYPE};
pub use error::ExtractError;
pub use extractor::{Extraction, Extractor};
pub use message::{MessageStream, ToolMessage};
