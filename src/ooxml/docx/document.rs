/// Document - the main API for working with Word document content.
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphMut};
use crate::ooxml::docx::parts::DocumentPart;
use crate::ooxml::docx::table::{self, Table};
use crate::ooxml::error::Result;

/// A Word document.
///
/// Gives access to the body-level paragraphs and tables of the main
/// document part, for reading and for in-place editing.
///
/// # Examples
///
/// ```rust,no_run
/// use docx_editor::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let doc = pkg.document();
///
/// for para in doc.paragraphs()? {
///     println!("{}", para.text());
/// }
/// println!("{} tables", doc.table_count()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    part: DocumentPart,
}

impl Document {
    /// Create a new Document from a DocumentPart.
    ///
    /// This is typically called internally by `Package`.
    #[inline]
    pub(crate) fn new(part: DocumentPart) -> Self {
        Self { part }
    }

    /// The underlying document part.
    #[inline]
    pub fn part(&self) -> &DocumentPart {
        &self.part
    }

    /// Paragraphs that are direct children of the body.
    pub fn paragraphs(&self) -> Result<Vec<Paragraph<'_>>> {
        Ok(self
            .part
            .body()?
            .child_elements()
            .filter(|e| e.is("p"))
            .map(Paragraph::new)
            .collect())
    }

    /// Tables that are direct children of the body.
    pub fn tables(&self) -> Result<Vec<Table<'_>>> {
        Ok(self
            .part
            .body()?
            .child_elements()
            .filter(|e| e.is("tbl"))
            .map(Table::new)
            .collect())
    }

    pub fn paragraph_count(&self) -> Result<usize> {
        Ok(self.part.body()?.child_elements().filter(|e| e.is("p")).count())
    }

    pub fn table_count(&self) -> Result<usize> {
        Ok(self.part.body()?.child_elements().filter(|e| e.is("tbl")).count())
    }

    /// Every editable paragraph, in visiting order.
    ///
    /// Body paragraphs come first, then the cell paragraphs of each body
    /// table (row by row, cell by cell). Nested tables, text boxes and
    /// content controls are not visited.
    pub fn all_paragraphs(&self) -> Result<Vec<Paragraph<'_>>> {
        let mut paragraphs = self.paragraphs()?;
        for table in self.tables()? {
            paragraphs.extend(table.paragraphs());
        }
        Ok(paragraphs)
    }

    /// Mutable counterpart of [`all_paragraphs`](Self::all_paragraphs), in the same order.
    pub fn all_paragraphs_mut(&mut self) -> Result<Vec<ParagraphMut<'_>>> {
        let body = self.part.body_mut()?;

        let mut paragraphs = Vec::new();
        let mut tables = Vec::new();
        for child in body.child_elements_mut() {
            if child.is("p") {
                paragraphs.push(ParagraphMut::new(child));
            } else if child.is("tbl") {
                tables.push(child);
            }
        }
        for tbl in tables {
            table::cell_paragraphs_mut(tbl, &mut paragraphs);
        }

        Ok(paragraphs)
    }

    /// Serialize the document part.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.part.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use crate::ooxml::docx::testing::document_from_body;

    const BODY: &str = concat!(
        r#"<w:p><w:r><w:t>First</w:t></w:r></w:p>"#,
        r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        r#"<w:p><w:r><w:t>Second</w:t></w:r></w:p>"#,
        r#"<w:sectPr/>"#
    );

    #[test]
    fn test_counts() {
        let doc = document_from_body(BODY);
        assert_eq!(doc.paragraph_count().unwrap(), 2);
        assert_eq!(doc.table_count().unwrap(), 1);
    }

    #[test]
    fn test_body_paragraphs_before_tables() {
        let doc = document_from_body(BODY);
        let texts: Vec<String> = doc
            .all_paragraphs()
            .unwrap()
            .iter()
            .map(|p| p.text())
            .collect();
        assert_eq!(texts, ["First", "Second", "Cell"]);
    }

    #[test]
    fn test_mutable_walk_order_matches() {
        let mut doc = document_from_body(BODY);
        let texts: Vec<String> = doc
            .all_paragraphs_mut()
            .unwrap()
            .iter()
            .map(|p| p.text())
            .collect();
        assert_eq!(texts, ["First", "Second", "Cell"]);
    }
}
