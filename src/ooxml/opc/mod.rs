//! Open Packaging Conventions (OPC) implementation.
//!
//! Covers the parts of OPC a text editor needs:
//!
//! - Part names and relationship resolution
//! - Content type discovery
//! - ZIP-based physical packaging that preserves member order and compression

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
