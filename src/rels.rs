//! Relationship resolution.
//!
//! The document body never embeds image bytes or link targets directly; it
//! references them through short relationship ids (`rId5`) declared in the
//! relationships part. [`ResourceIndex`] is built once per document from that
//! part and is the only lookup surface the translators see.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::package;

/// What a relationship points at. Everything else in the relationships part
/// (styles, fonts, numbering definitions) is dropped at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Hyperlink,
}

/// One resolved relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub id: String,
    pub kind: ResourceKind,
    /// Container-relative path (`media/image1.png`) or an external URL.
    pub target: String,
    /// `TargetMode="External"` in the source part.
    pub external: bool,
}

/// Id -> entry map, read-only for the remainder of the parse.
#[derive(Debug, Default)]
pub struct ResourceIndex {
    entries: HashMap<String, ResourceEntry>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ResourceEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Look up a relationship id.
    ///
    /// Callers are expected to degrade locally on [`Error::ResourceNotFound`],
    /// e.g. by emitting an element without its `src`/`href`.
    pub fn get(&self, id: &str) -> Result<&ResourceEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| Error::ResourceNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the index from the relationships part.
///
/// Embedded (non-external) images are streamed out of the archive and written
/// under `images_dir`, named by their target path with the leading `media/`
/// segment stripped. A single failed write is recorded and skipped; the
/// conversion continues.
pub(crate) fn build_resource_index<R: Read + Seek>(
    rels_xml: &str,
    archive: &mut ZipArchive<R>,
    images_dir: &Path,
    errors: &mut Vec<String>,
) -> Result<ResourceIndex> {
    let mut index = ResourceIndex::new();
    let mut reader = Reader::from_str(rels_xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut external = false;

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        b"TargetMode" => external = value == "External",
                        _ => {}
                    }
                }

                // The kind is the last path segment of the type URI
                let kind = match rel_type.rsplit('/').next() {
                    Some("image") => ResourceKind::Image,
                    Some("hyperlink") => ResourceKind::Hyperlink,
                    _ => continue,
                };

                if kind == ResourceKind::Image && !external {
                    if let Err(e) = extract_media(archive, &target, images_dir) {
                        let message =
                            format!("couldn't extract embedded image {target}: {e}");
                        log::warn!("{message}");
                        errors.push(message);
                    }
                }

                if id.is_empty() {
                    continue;
                }
                index.insert(ResourceEntry {
                    id,
                    kind,
                    target,
                    external,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::RelsXml(e)),
            _ => {}
        }
    }

    log::debug!("resource index built with {} entries", index.len());
    Ok(index)
}

/// Copy one embedded media entry out of the archive.
///
/// The target comes straight out of the archive, so anything that would
/// escape the destination directory is rejected before any bytes move.
fn extract_media<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    target: &str,
    images_dir: &Path,
) -> Result<()> {
    let name = target.replace("media/", "");
    let safe = Path::new(&name)
        .components()
        .all(|c| matches!(c, std::path::Component::Normal(_)));
    if !safe {
        return Err(Error::MalformedNode(format!(
            "media target {target} escapes the images directory"
        )));
    }

    let data = package::read_entry_bytes(archive, &format!("word/{target}"))?;
    std::fs::write(images_dir.join(name), &data)?;
    Ok(())
}
