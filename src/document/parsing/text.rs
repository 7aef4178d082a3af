//! Plain text extraction from WordprocessingML parts
//!
//! Text is read straight from the part XML with quick-xml rather than
//! through a document model, so nothing in the body is dropped: text boxes,
//! hyperlinks, tracked insertions and table cells all contribute their runs.

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use regex::Regex;
use tracing::debug;

use crate::document::io::{read_part, DocxArchive, DOCUMENT_PART};
use crate::error::{ExtractError, Result};

const WORDPROCESSING_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const MARKUP_COMPATIBILITY_NS: &[u8] =
    b"http://schemas.openxmlformats.org/markup-compatibility/2006";

static HEADER_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/header(\d*)\.xml$").unwrap());
static FOOTER_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/footer(\d*)\.xml$").unwrap());

/// Which optional parts contribute to the extracted text
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextParts {
    pub(crate) headers: bool,
    pub(crate) footers: bool,
}

/// Extract the document text: headers, then the body, then footers
pub(crate) fn extract_document_text(
    archive: &mut DocxArchive<'_>,
    parts: TextParts,
) -> Result<String> {
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();

    let mut part_names = Vec::new();
    if parts.headers {
        part_names.extend(numbered_parts(&names, &HEADER_PART));
    }
    part_names.push(DOCUMENT_PART.to_string());
    if parts.footers {
        part_names.extend(numbered_parts(&names, &FOOTER_PART));
    }

    let mut text = String::new();
    for name in &part_names {
        let xml = read_part(archive, name)?;
        let part_text = part_xml_to_text(&xml)?;
        debug!(part = %name, chars = part_text.len(), "extracted part text");
        text.push_str(&part_text);
    }

    Ok(text.trim().to_string())
}

/// Part names matching `pattern`, ordered by their numeric suffix
fn numbered_parts(names: &[String], pattern: &Regex) -> Vec<String> {
    let mut matches: Vec<(u32, String)> = names
        .iter()
        .filter_map(|name| {
            let caps = pattern.captures(name)?;
            let number = caps[1].parse().unwrap_or(0);
            Some((number, name.clone()))
        })
        .collect();
    matches.sort();
    matches.into_iter().map(|(_, name)| name).collect()
}

/// Elements the text rules care about, identified by namespace URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Paragraph,
    Run,
    Text,
    Tab,
    Break,
    Fallback,
    Other,
}

impl Tag {
    fn classify(ns: &ResolveResult<'_>, local: &[u8]) -> Self {
        match ns {
            ResolveResult::Bound(Namespace(uri)) if *uri == WORDPROCESSING_NS => match local {
                b"p" => Tag::Paragraph,
                b"r" => Tag::Run,
                b"t" => Tag::Text,
                b"tab" => Tag::Tab,
                b"br" | b"cr" => Tag::Break,
                _ => Tag::Other,
            },
            ResolveResult::Bound(Namespace(uri))
                if *uri == MARKUP_COMPATIBILITY_NS && local == b"Fallback" =>
            {
                Tag::Fallback
            }
            _ => Tag::Other,
        }
    }
}

/// Convert one part's XML into text
///
/// Paragraphs open with a blank line, tabs and breaks inside runs become
/// `\t` and `\n`, and `mc:Fallback` content is skipped since it repeats the
/// `mc:Choice` rendition. Elements are matched by namespace URI, so any
/// prefix (or a default namespace) works.
pub(crate) fn part_xml_to_text(xml: &[u8]) -> Result<String> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false); // Don't trim to preserve spacing

    let mut buf = Vec::new();
    let mut text = String::new();
    let mut run_depth = 0usize;
    let mut fallback_depth = 0usize;
    let mut in_text = false;

    loop {
        {
            let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
            let tag = match &event {
                Event::Start(e) | Event::Empty(e) => Tag::classify(&ns, e.local_name().as_ref()),
                Event::End(e) => Tag::classify(&ns, e.local_name().as_ref()),
                _ => Tag::Other,
            };

            match event {
                Event::Eof => break,
                Event::Start(_) if tag == Tag::Fallback => {
                    fallback_depth += 1;
                }
                Event::End(_) if tag == Tag::Fallback => {
                    fallback_depth = fallback_depth.saturating_sub(1);
                }
                _ if fallback_depth > 0 => {}
                Event::Start(_) | Event::Empty(_) if tag == Tag::Paragraph => {
                    text.push_str("\n\n");
                }
                Event::Start(_) if tag == Tag::Run => {
                    run_depth += 1;
                }
                Event::End(_) if tag == Tag::Run => {
                    run_depth = run_depth.saturating_sub(1);
                }
                Event::Start(_) if tag == Tag::Text => {
                    in_text = true;
                }
                Event::End(_) if tag == Tag::Text => {
                    in_text = false;
                }
                Event::Text(e) if in_text => {
                    text.push_str(&e.unescape().map_err(ExtractError::decode)?);
                }
                Event::Start(_) | Event::Empty(_) if run_depth > 0 => match tag {
                    Tag::Tab => text.push('\t'),
                    Tag::Break => text.push('\n'),
                    _ => {}
                },
                _ => {}
            }
        }
        buf.clear();
    }

    Ok(text)
}
