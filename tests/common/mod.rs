//! In-memory .docx fixtures shared by the integration tests

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use docx_extract::{DocumentPayload, WORD_MIME_TYPE};
use zip::write::SimpleFileOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

#[derive(Debug, Default, Clone)]
pub struct DocxBuilder {
    paragraphs: Vec<String>,
    headers: Vec<String>,
    footers: Vec<String>,
    media: Vec<(String, Vec<u8>)>,
    raw_document: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.paragraphs.push(text.to_string());
        self
    }

    pub fn header(mut self, text: &str) -> Self {
        self.headers.push(text.to_string());
        self
    }

    pub fn footer(mut self, text: &str) -> Self {
        self.footers.push(text.to_string());
        self
    }

    /// Adds `word/media/<name>`
    pub fn media(mut self, name: &str, data: Vec<u8>) -> Self {
        self.media.push((name.to_string(), data));
        self
    }

    /// Replaces the generated `word/document.xml` verbatim
    pub fn raw_document(mut self, xml: &str) -> Self {
        self.raw_document = Some(xml.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let mut write = |name: &str, data: &[u8]| {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        };

        write("[Content_Types].xml", CONTENT_TYPES.as_bytes());
        write("_rels/.rels", PACKAGE_RELS.as_bytes());

        let document = match &self.raw_document {
            Some(xml) => xml.clone(),
            None => part_xml("w:document", "<w:body>", &self.paragraphs, "</w:body>"),
        };
        write("word/document.xml", document.as_bytes());

        for (i, text) in self.headers.iter().enumerate() {
            let xml = part_xml("w:hdr", "", std::slice::from_ref(text), "");
            write(&format!("word/header{}.xml", i + 1), xml.as_bytes());
        }
        for (i, text) in self.footers.iter().enumerate() {
            let xml = part_xml("w:ftr", "", std::slice::from_ref(text), "");
            write(&format!("word/footer{}.xml", i + 1), xml.as_bytes());
        }
        for (name, data) in &self.media {
            write(&format!("word/media/{name}"), data);
        }

        writer.finish().unwrap().into_inner()
    }

    pub fn payload(&self) -> DocumentPayload {
        DocumentPayload::new(self.build(), WORD_MIME_TYPE)
    }
}

fn part_xml(root: &str, open: &str, paragraphs: &[String], close: &str) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><{root} xmlns:w="{W_NS}">{open}"#
    );
    for text in paragraphs {
        xml.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            escape(text)
        ));
    }
    xml.push_str(&format!("{close}</{root}>"));
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn png_bytes(red: u8) -> Vec<u8> {
    encode(red, image::ImageFormat::Png)
}

pub fn jpeg_bytes(red: u8) -> Vec<u8> {
    encode(red, image::ImageFormat::Jpeg)
}

fn encode(red: u8, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([red, 64, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// Number of entries directly inside `dir`
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
