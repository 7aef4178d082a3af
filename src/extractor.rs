//! Extraction orchestration
//!
//! [`Extractor::extract`] validates and decodes a payload up front, so any
//! decode failure surfaces before a single asset is produced. What it hands
//! back is an [`Extraction`]: a lazy, finite iterator that reads the staged
//! images back from the workspace one at a time, then yields the text, then
//! releases the workspace. Dropping an `Extraction` part-way through
//! releases the workspace as well.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ExtractorConfig;
use crate::document::io::open_docx_container;
use crate::document::parsing::media::stage_embedded_media;
use crate::document::parsing::text::{extract_document_text, TextParts};
use crate::document::{
    DocumentPayload, ExtractedAsset, ImageAsset, TransientWorkspace, WORD_MIME_TYPE,
};
use crate::error::{ExtractError, Result};
use crate::media_type;

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Start an extraction call for one payload
    ///
    /// Fails with [`ExtractError::UnsupportedFormat`] or
    /// [`ExtractError::EmptyInput`] before touching the filesystem, and with
    /// [`ExtractError::Decode`] when the payload is not a readable Word
    /// container. In every failure case the workspace is already gone when
    /// this returns.
    pub fn extract(&self, payload: DocumentPayload) -> Result<Extraction> {
        if payload.media_type != WORD_MIME_TYPE {
            return Err(ExtractError::UnsupportedFormat(payload.media_type));
        }
        if payload.data.is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let workspace = TransientWorkspace::create(
            self.config.workspace_root.as_deref(),
            &self.config.workspace_prefix,
        )?;

        // On any error below, `workspace` is dropped and removed
        let mut archive = open_docx_container(&payload.data)?;
        stage_embedded_media(&mut archive, workspace.path())?;
        let text = extract_document_text(
            &mut archive,
            TextParts {
                headers: self.config.include_headers,
                footers: self.config.include_footers,
            },
        )?;
        let images = workspace.staged_files()?;

        info!(
            document = payload.file_name.as_deref().unwrap_or("<unnamed>"),
            bytes = payload.data.len(),
            images = images.len(),
            text_chars = text.chars().count(),
            "decoded document"
        );

        Ok(Extraction {
            workspace: Some(workspace),
            images: images.into_iter(),
            text: Some(text),
            file_stem: payload.file_stem(),
            yielded_images: 0,
        })
    }
}

/// The lazily produced asset stream of one extraction call
///
/// Yields every staged image, then the text, then ends. A failure while
/// streaming is yielded once as an `Err` item and ends the stream.
#[derive(Debug)]
pub struct Extraction {
    workspace: Option<TransientWorkspace>,
    images: std::vec::IntoIter<PathBuf>,
    text: Option<String>,
    file_stem: String,
    yielded_images: usize,
}

impl Extraction {
    /// Directory holding the staged images, while the call is still running
    pub fn workspace_path(&self) -> Option<&Path> {
        self.workspace.as_ref().map(TransientWorkspace::path)
    }

    /// Number of staged images not yet yielded
    pub fn remaining_images(&self) -> usize {
        self.images.len()
    }

    fn read_image(&mut self, path: &Path) -> Result<ImageAsset> {
        let data = fs::read(path)?;
        self.yielded_images += 1;

        let mime = media_type::classify(path, &data);
        let file_name = format!(
            "{}_image_{}{}",
            self.file_stem,
            self.yielded_images,
            media_type::output_extension(path)
        );
        debug!(image = %path.display(), media_type = mime, bytes = data.len(), "read staged image");

        Ok(ImageAsset {
            file_name,
            media_type: mime.to_string(),
            data,
        })
    }

    fn finish(&mut self) {
        self.images = Vec::new().into_iter();
        self.text = None;
        self.workspace = None;
    }
}

impl Iterator for Extraction {
    type Item = Result<ExtractedAsset>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(path) = self.images.next() {
            return match self.read_image(&path) {
                Ok(image) => Some(Ok(ExtractedAsset::Image(image))),
                Err(e) => {
                    self.finish();
                    Some(Err(e))
                }
            };
        }

        let text = self.text.take()?;
        if let Some(workspace) = self.workspace.take() {
            if let Err(e) = workspace.release() {
                return Some(Err(e.into()));
            }
        }
        Some(Ok(ExtractedAsset::Text(text)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.images.len() + usize::from(self.text.is_some());
        (0, Some(remaining))
    }
}

impl std::iter::FusedIterator for Extraction {}
