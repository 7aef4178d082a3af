//! Core data structures for extraction calls
//!
//! This module defines the payload handed to the extractor and the assets
//! it hands back.

/// Media type a payload must declare to be accepted
pub const WORD_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Media type used for staged files that cannot be classified
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// File stem used for image names when the payload carries no file name
pub const DEFAULT_DOCUMENT_STEM: &str = "document";

/// Raw bytes of a single .docx file plus what the caller declared about it
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub data: Vec<u8>,
    pub media_type: String,
    pub file_name: Option<String>,
}

impl DocumentPayload {
    pub fn new(data: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            media_type: media_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// File name without its last extension, used to name image outputs
    pub fn file_stem(&self) -> String {
        match self.file_name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => match name.rsplit_once('.') {
                Some((stem, _)) => stem.to_string(),
                None => name.to_string(),
            },
            None => DEFAULT_DOCUMENT_STEM.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub file_name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// One unit of output from an extraction call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedAsset {
    Image(ImageAsset),
    Text(String),
}

impl ExtractedAsset {
    pub fn is_image(&self) -> bool {
        matches!(self, ExtractedAsset::Image(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExtractedAsset::Text(text) => Some(text),
            ExtractedAsset::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageAsset> {
        match self {
            ExtractedAsset::Image(image) => Some(image),
            ExtractedAsset::Text(_) => None,
        }
    }
}
