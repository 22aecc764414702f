//! Plain-text extraction.
use crate::ooxml::docx::document::Document;
use crate::ooxml::error::Result;

/// Separator placed between extracted paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Trimmed text of every non-blank paragraph, in visiting order.
pub fn paragraph_texts(document: &Document) -> Result<Vec<String>> {
    Ok(document
        .all_paragraphs()?
        .iter()
        .filter_map(|p| {
            let text = p.text();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect())
}

/// Extract the document text.
///
/// Paragraphs are visited like [`apply_replacements`](super::apply_replacements)
/// does; blank ones are skipped and the rest are trimmed and joined with a
/// blank line.
pub fn extract_text(document: &Document) -> Result<String> {
    let paragraphs = paragraph_texts(document)?;
    tracing::debug!(paragraphs = paragraphs.len(), "extracted text");
    Ok(paragraphs.join(PARAGRAPH_SEPARATOR))
}
