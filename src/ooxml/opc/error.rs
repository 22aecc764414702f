//! Errors raised while reading and writing OPC packages.
use quick_xml::events::attributes::AttrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("package file not found: {0}")]
    PackageNotFound(String),

    /// The members of the archive unpack to more than the allowed total
    #[error("package unpacks to more than {limit} bytes")]
    PackageTooLarge { limit: u64 },

    #[error("invalid part name: {0}")]
    InvalidPackUri(String),

    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("no package relationship of type {0}")]
    RelationshipNotFound(String),

    #[error("no content type for part {0}")]
    ContentTypeNotFound(String),

    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Syntax error in one of the package-level XML parts
    #[error("malformed {part}: {source}")]
    MalformedPart {
        part: &'static str,
        #[source]
        source: quick_xml::Error,
    },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("invalid ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OpcError>;
