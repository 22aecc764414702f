//! Office Open XML (OOXML) format implementation.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! mirrors the part and proxy layering common to OOXML libraries.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, content types, relationships)
//! 2. **Error types** (`error`)
//! 3. **Word documents** (`docx`): paragraphs, tables, replacement and extraction
//!
//! # Example: Working with Word Documents
//!
//! ```rust,no_run
//! use docx_editor::ooxml::docx::{Package, extract_text};
//!
//! let pkg = Package::open("document.docx")?;
//! let doc = pkg.document();
//!
//! println!("Document contains {} paragraphs", doc.paragraph_count()?);
//! println!("{}", extract_text(doc)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
