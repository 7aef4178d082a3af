//! Error taxonomy for extraction calls

use thiserror::Error;

use crate::document::WORD_MIME_TYPE;

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The caller handed over a payload with no bytes in it
    #[error("No document payload supplied")]
    EmptyInput,

    /// The declared media type is not the Word document type
    #[error("Unsupported media type `{0}`. Expected {expected}", expected = WORD_MIME_TYPE)]
    UnsupportedFormat(String),

    /// The payload is not a parseable Word container
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Workspace creation, staging or cleanup failed
    #[error("Workspace I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    pub(crate) fn decode(message: impl std::fmt::Display) -> Self {
        ExtractError::Decode(message.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::decode(format!("invalid .docx container ({err})"))
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        ExtractError::decode(format!("malformed document XML ({err})"))
    }
}
