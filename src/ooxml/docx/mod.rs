/// Word (.docx) document support.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Package`: The overall .docx file package
/// - `Document`: The body of the main document part
/// - `Paragraph` / `ParagraphMut`: A paragraph with runs, read-only or editable
/// - `Run`: A text run
/// - `Table`: A table with rows and cells
/// - `DocumentPart`: The core document.xml part
///
/// On top of these sit the editing operations: [`apply_replacements`] for
/// whole-paragraph replacement, [`extract_text`] for plain-text extraction,
/// and [`derive_text_map`] to build a replacement map from edited text.
///
/// # Example
///
/// ```rust,no_run
/// use docx_editor::ooxml::docx::{Package, ReplacementMap, apply_replacements, extract_text};
///
/// let mut package = Package::open("document.docx")?;
/// println!("{}", extract_text(package.document())?);
///
/// let map = ReplacementMap::from_json(r#"{"Total: 5": "Total: 10"}"#)?;
/// let report = apply_replacements(package.document_mut(), &map)?;
/// println!("replaced {} of {} paragraphs", report.replaced, report.visited);
/// package.save("edited.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod document;
pub mod extract;
pub mod package;
pub mod paragraph;
pub mod parts;
pub mod replace;
pub mod table;
pub mod text_map;

#[cfg(test)]
pub(crate) mod testing;

pub use document::Document;
pub use extract::{extract_text, paragraph_texts};
pub use package::Package;
pub use paragraph::{Paragraph, ParagraphMut, Run};
pub use replace::{ReplaceReport, ReplacementMap, apply_replacements};
pub use table::{Cell, Row, Table};
pub use text_map::derive_text_map;
