//! Container opening and validation
//!
//! This module checks that a payload is a Word container and hands back a
//! ZIP archive reading straight from the in-memory buffer.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{ExtractError, Result};

pub(crate) const DOCUMENT_PART: &str = "word/document.xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";
const PRESENTATION_PART: &str = "ppt/presentation.xml";

pub(crate) type DocxArchive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Opens the payload as a ZIP archive and validates it is a Word document
pub(crate) fn open_docx_container(data: &[u8]) -> Result<DocxArchive<'_>> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    if archive.index_for_name(DOCUMENT_PART).is_none() {
        if archive.index_for_name(WORKBOOK_PART).is_some() {
            return Err(ExtractError::decode(
                "this appears to be an Excel file (.xlsx); only Word documents (.docx) are supported",
            ));
        }
        if archive.index_for_name(PRESENTATION_PART).is_some() {
            return Err(ExtractError::decode(
                "this appears to be a PowerPoint file (.pptx); only Word documents (.docx) are supported",
            ));
        }

        return Err(ExtractError::decode(format!(
            "invalid .docx file: missing {DOCUMENT_PART}. \
            The file may be corrupted or is not a valid Word document"
        )));
    }

    Ok(archive)
}

/// Reads a whole archive member into memory
pub(crate) fn read_part(archive: &mut DocxArchive<'_>, name: &str) -> Result<Vec<u8>> {
    let mut entry = archive.by_name(name)?;
    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .map_err(|e| ExtractError::decode(format!("failed to read {name} ({e})")))?;
    Ok(contents)
}
