//! Embedded media staging
//!
//! Word keeps every embedded picture under `word/media/`. This module copies
//! those entries into the call's workspace so they can be classified and
//! streamed back one by one.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::io::DocxArchive;
use crate::error::{ExtractError, Result};

const MEDIA_DIR: &str = "word/media";

/// Writes every `word/media/` entry into `workspace` under its base name
///
/// Entries sharing a base name overwrite each other, so the workspace listing
/// is the only reliable image count.
pub(crate) fn stage_embedded_media(archive: &mut DocxArchive<'_>, workspace: &Path) -> Result<()> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if !entry.is_file() {
            continue;
        }

        // Entries whose names escape the archive root are never written out
        let Some(target) = media_target(entry.enclosed_name(), workspace) else {
            continue;
        };

        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents).map_err(|e| {
            ExtractError::decode(format!("failed to read embedded media {} ({e})", entry.name()))
        })?;

        fs::write(&target, &contents)?;
        debug!(entry = %entry.name(), bytes = contents.len(), "staged embedded media");
    }

    Ok(())
}

/// Workspace path for an archive entry, if the entry lives under `word/media/`
fn media_target(enclosed_name: Option<PathBuf>, workspace: &Path) -> Option<PathBuf> {
    let name = enclosed_name?;
    if !name.starts_with(MEDIA_DIR) {
        return None;
    }
    let file_name = name.file_name()?;
    Some(workspace.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_entries_map_to_base_name() {
        let workspace = Path::new("/tmp/ws");
        assert_eq!(
            media_target(Some(PathBuf::from("word/media/image1.png")), workspace),
            Some(PathBuf::from("/tmp/ws/image1.png"))
        );
        assert_eq!(
            media_target(Some(PathBuf::from("word/media/nested/chart.emf")), workspace),
            Some(PathBuf::from("/tmp/ws/chart.emf"))
        );
    }

    #[test]
    fn test_non_media_entries_are_skipped() {
        let workspace = Path::new("/tmp/ws");
        assert_eq!(media_target(Some(PathBuf::from("word/document.xml")), workspace), None);
        assert_eq!(media_target(Some(PathBuf::from("word/mediafile.png")), workspace), None);
        assert_eq!(media_target(None, workspace), None);
    }
}
