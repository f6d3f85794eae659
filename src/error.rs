//! Error types for document conversion.

use thiserror::Error;

/// Errors that can occur while converting a document.
///
/// Malformed document *content* is recovered locally and never surfaces here;
/// these variants cover configuration problems, unreadable containers and the
/// recursion guard. Locally recovered conditions are recorded on the engine's
/// error list instead (see [`crate::DocxParser::errors`]).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("relationships XML error: {0}")]
    RelsXml(#[from] quick_xml::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("no relationship with id {0}")]
    ResourceNotFound(String),

    #[error("malformed node: {0}")]
    MalformedNode(String),

    #[error("document nesting exceeds the recursion limit")]
    DocumentTooComplex,
}

pub type Result<T> = std::result::Result<T, Error>;
