//! Host message boundary
//!
//! Hosts consume an extraction call as a stream of [`ToolMessage`]s: one
//! `blob` per image, one `text` message, or a single `error` message that
//! ends the stream. Serialized to JSON, blob data is standard base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};

use crate::document::{DocumentPayload, ExtractedAsset};
use crate::error::ExtractError;
use crate::extractor::{Extraction, Extractor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ToolMessage {
    Blob {
        #[serde(rename = "mediaType")]
        media_type: String,
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(serialize_with = "serialize_base64")]
        data: Vec<u8>,
    },
    Text {
        data: String,
    },
    Error {
        message: String,
    },
}

impl ToolMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolMessage::Error { .. })
    }
}

impl From<ExtractedAsset> for ToolMessage {
    fn from(asset: ExtractedAsset) -> Self {
        match asset {
            ExtractedAsset::Image(image) => ToolMessage::Blob {
                media_type: image.media_type,
                file_name: image.file_name,
                data: image.data,
            },
            ExtractedAsset::Text(data) => ToolMessage::Text { data },
        }
    }
}

impl From<ExtractError> for ToolMessage {
    fn from(err: ExtractError) -> Self {
        ToolMessage::Error {
            message: err.to_string(),
        }
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

/// Message stream for one extraction call, ended by its first error
#[derive(Debug)]
pub struct MessageStream {
    state: StreamState,
}

#[derive(Debug)]
enum StreamState {
    Running(Extraction),
    Failed(ExtractError),
    Done,
}

impl MessageStream {
    pub fn new(extractor: &Extractor, payload: DocumentPayload) -> Self {
        match extractor.extract(payload) {
            Ok(extraction) => extraction.into(),
            Err(e) => Self {
                state: StreamState::Failed(e),
            },
        }
    }
}

/// Wraps an extraction that has already started
impl From<Extraction> for MessageStream {
    fn from(extraction: Extraction) -> Self {
        Self {
            state: StreamState::Running(extraction),
        }
    }
}

impl Iterator for MessageStream {
    type Item = ToolMessage;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, StreamState::Done) {
            StreamState::Running(mut extraction) => match extraction.next() {
                Some(Ok(asset)) => {
                    self.state = StreamState::Running(extraction);
                    Some(asset.into())
                }
                Some(Err(e)) => Some(e.into()),
                None => None,
            },
            StreamState::Failed(e) => Some(e.into()),
            StreamState::Done => None,
        }
    }
}

impl std::iter::FusedIterator for MessageStream {}
