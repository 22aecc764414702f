//! Error types for OOXML operations.
use crate::common::xml::XmlError;
use crate::ooxml::opc::error::OpcError;
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

#[derive(Error, Debug)]
pub enum OoxmlError {
    #[error("package error: {0}")]
    Opc(#[from] OpcError),

    /// A part could not be parsed as XML
    #[error("malformed XML part: {0}")]
    Xml(#[from] XmlError),

    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Well-formed XML that is not shaped like a Word document
    #[error("invalid document: {0}")]
    InvalidFormat(String),

    /// Text holding a character that cannot appear in an XML document,
    /// such as a control character other than tab, line feed and carriage
    /// return
    #[error("text contains U+{codepoint:04X} at byte {position}, which XML does not allow")]
    InvalidXmlChar { codepoint: u32, position: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OoxmlError {
    /// Whether the package was rejected for unpacking to too many bytes.
    pub fn is_too_large(&self) -> bool {
        matches!(self, OoxmlError::Opc(OpcError::PackageTooLarge { .. }))
    }
}
