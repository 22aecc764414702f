//! docx-editor - whole-paragraph editing and text extraction for Word documents
//!
//! This library opens `.docx` packages, replaces paragraphs whose trimmed
//! text matches a key of a [`ReplacementMap`](ooxml::docx::ReplacementMap),
//! and writes the package back with every other part untouched.
//!
//! # Features
//!
//! - **Lossless rewrite**: only the main document part is re-serialized;
//!   member order and compression of the archive are kept
//! - **Tables**: paragraphs inside table cells are edited like body paragraphs
//! - **Text extraction**: paragraph texts joined by blank lines
//! - **HTTP service** (feature `server`): multipart endpoints for editing
//!   and extraction
//!
//! # Example - Editing a DOCX file
//!
//! ```no_run
//! use docx_editor::ooxml::docx::{Package, ReplacementMap, apply_replacements};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("report.docx")?;
//! let map = ReplacementMap::from_json(r#"{"Total: 5": "Total: 10"}"#)?;
//!
//! let report = apply_replacements(pkg.document_mut(), &map)?;
//! println!("replaced {} paragraphs", report.replaced);
//!
//! pkg.save("edited_report.docx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Extracting text
//!
//! ```no_run
//! use docx_editor::ooxml::docx::{Package, extract_text};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("report.docx")?;
//! println!("{}", extract_text(pkg.document())?);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod ooxml;

#[cfg(feature = "server")]
pub mod server;

pub use ooxml::docx::{Document, Package, ReplaceReport, ReplacementMap, apply_replacements, extract_text};
pub use ooxml::{OoxmlError, Result};
