//! Access to the DOCX zip container.
//!
//! A `.docx` file is a zip archive; the parts the converter needs are the
//! main document tree, its relationships part, and the embedded media files:
//!
//! - `word/document.xml`: body content (paragraphs, tables, runs)
//! - `word/_rels/document.xml.rels`: relationships (images, hyperlinks)
//! - `word/media/*`: embedded image bytes

use std::io::{Read, Seek};

use zip::ZipArchive;

use crate::error::Result;

pub(crate) const DOCUMENT_ENTRY: &str = "word/document.xml";
pub(crate) const RELATIONSHIPS_ENTRY: &str = "word/_rels/document.xml.rels";

/// Read a named archive entry into a byte buffer.
pub(crate) fn read_entry_bytes<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>> {
    let mut file = archive.by_name(name)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Read a named archive entry and decode it to text.
pub(crate) fn read_entry_text<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String> {
    Ok(decode_entry(&read_entry_bytes(archive, name)?))
}

/// Decode entry bytes, tolerating a BOM and legacy encodings.
///
/// OOXML parts are UTF-8 in practice, but old exporters occasionally produce
/// Windows-1252; fall back to that rather than failing the conversion.
pub(crate) fn decode_entry(bytes: &[u8]) -> String {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text.into_owned();
    }
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}
