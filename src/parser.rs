//! The conversion engine.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::config::{HeuristicProfile, ParserConfig};
use crate::error::{Error, Result};
use crate::package::{self, DOCUMENT_ENTRY, RELATIONSHIPS_ENTRY};
use crate::rels::{ResourceIndex, build_resource_index};
use crate::render::{NS_WML, Renderer};
use crate::style::StyleSheet;

/// Converts DOCX files into HTML fragments.
///
/// Construction validates the configuration (the images destination must be
/// writable); after that, per-document problems never abort the engine.
/// Container failures and skipped images are collected on [`errors`] and the
/// affected conversion yields an empty string, so a batch over many files
/// keeps going.
///
/// [`errors`]: DocxParser::errors
///
/// # Example
///
/// ```no_run
/// use docx2html::{DocxParser, ParserConfig, StyleSheet};
///
/// let mut parser = DocxParser::new(ParserConfig::default(), StyleSheet::default())?;
/// let html = parser.parse_file("report.docx");
/// for error in parser.errors() {
///     eprintln!("warning: {error}");
/// }
/// # Ok::<(), docx2html::Error>(())
/// ```
pub struct DocxParser {
    styles: StyleSheet,
    exclude: HashSet<String>,
    profile: HeuristicProfile,
    images_dir: PathBuf,
    image_prefix: String,
    errors: Vec<String>,
}

impl DocxParser {
    /// Create an engine, validating the configuration.
    ///
    /// The images destination is created if missing and must be writable;
    /// otherwise this fails with [`Error::Config`] and no conversion runs.
    pub fn new(config: ParserConfig, styles: StyleSheet) -> Result<Self> {
        let images_dir = config.images_dir;
        std::fs::create_dir_all(&images_dir).map_err(|e| {
            Error::Config(format!(
                "images destination {} is not usable: {e}",
                images_dir.display()
            ))
        })?;
        let metadata = std::fs::metadata(&images_dir)?;
        if metadata.permissions().readonly() {
            return Err(Error::Config(format!(
                "images destination {} is not writable",
                images_dir.display()
            )));
        }

        let mut image_prefix = images_dir
            .to_string_lossy()
            .trim_end_matches('/')
            .to_string();
        image_prefix.push('/');

        Ok(Self {
            styles,
            exclude: config.exclude.into_iter().collect(),
            profile: config.profile,
            images_dir,
            image_prefix,
            errors: Vec::new(),
        })
    }

    /// Human-readable messages for everything that went wrong so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Drain the collected messages, e.g. between files of a batch.
    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    /// Convert a single file; failures are recorded and yield `""`.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> String {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                self.errors
                    .push(format!("couldn't open file {}: {e}", path.display()));
                return String::new();
            }
        };
        self.parse_reader(file)
    }

    /// Convert a document from any `Read + Seek` source.
    pub fn parse_reader<R: Read + Seek>(&mut self, reader: R) -> String {
        match self.convert(reader) {
            Ok(html) => html,
            Err(e) => {
                self.errors.push(e.to_string());
                String::new()
            }
        }
    }

    fn convert<R: Read + Seek>(&mut self, reader: R) -> Result<String> {
        let mut archive = ZipArchive::new(reader)?;

        // The relationships part comes first: the body references images and
        // link targets only through it. Documents without one are fine.
        let resources = match package::read_entry_text(&mut archive, RELATIONSHIPS_ENTRY) {
            Ok(xml) => {
                build_resource_index(&xml, &mut archive, &self.images_dir, &mut self.errors)?
            }
            Err(_) => ResourceIndex::new(),
        };

        let xml = package::read_entry_text(&mut archive, DOCUMENT_ENTRY)
            .map_err(|_| Error::InvalidDocument(format!("missing {DOCUMENT_ENTRY}")))?;
        let doc = roxmltree::Document::parse(&xml)?;

        let Some(body) = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name((NS_WML, "body")))
        else {
            log::debug!("document has no body element");
            return Ok(String::new());
        };

        let renderer = Renderer {
            resources: &resources,
            styles: &self.styles,
            exclude: &self.exclude,
            profile: &self.profile,
            image_prefix: &self.image_prefix,
        };
        renderer.render_body(body)
    }
}
