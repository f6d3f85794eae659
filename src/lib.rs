//! # docx2html
//!
//! A lightweight converter from Word-processing documents (DOCX) to flat
//! HTML fragments.
//!
//! ## Features
//!
//! - Paragraphs, headings, lists, tables (including merges and nesting)
//! - Inline bold/italic/underline formatting and hyperlinks
//! - Embedded and external images, with embedded bytes extracted to disk
//! - Configurable output styling and heuristics, exclusion filter
//!
//! ## Quick Start
//!
//! ```no_run
//! use docx2html::{DocxParser, ParserConfig, StyleSheet};
//!
//! let config = ParserConfig::with_images_dir("out/images");
//! let mut parser = DocxParser::new(config, StyleSheet::default())?;
//!
//! let html = parser.parse_file("input.docx");
//! std::fs::write("output.html", &html)?;
//!
//! // Content problems are recorded, not fatal
//! for error in parser.errors() {
//!     eprintln!("warning: {error}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The output is a fragment, not a full page: the caller decides the
//! surrounding document. Tag attributes come from a [`StyleSheet`] so the
//! fragment drops into an existing page without extra CSS; pass
//! [`HeuristicProfile::unstyled`] for bare tags instead.

pub mod config;
pub mod error;
pub mod parser;
pub mod rels;
pub mod style;

pub(crate) mod package;
pub(crate) mod render;
pub(crate) mod text;

pub use config::{HeuristicProfile, ParserConfig};
pub use error::{Error, Result};
pub use parser::DocxParser;
pub use rels::{ResourceEntry, ResourceIndex, ResourceKind};
pub use style::StyleSheet;
