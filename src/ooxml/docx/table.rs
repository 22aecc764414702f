/// Table, Row, and Cell structures for Word documents.
use crate::common::xml::XmlElement;
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphMut};
use smallvec::SmallVec;

/// A table in a Word document.
///
/// Represents a `<w:tbl>` element. Tables contain rows, which contain cells,
/// which contain paragraphs.
///
/// # Example
///
/// ```rust,ignore
/// for table in document.tables()? {
///     for (row_idx, row) in table.rows().iter().enumerate() {
///         for (col_idx, cell) in row.cells().iter().enumerate() {
///             println!("Cell [{},{}]: {}", row_idx, col_idx, cell.text());
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a XmlElement,
}

impl<'a> Table<'a> {
    #[inline]
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Rows (`<w:tr>`) in order.
    pub fn rows(&self) -> SmallVec<[Row<'a>; 16]> {
        self.element
            .child_elements()
            .filter(|e| e.is("tr"))
            .map(Row::new)
            .collect()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.element.child_elements().filter(|e| e.is("tr")).count()
    }

    /// Cell at the given row and `<w:tc>` position.
    ///
    /// Positions count cell elements, so a cell spanning several grid
    /// columns occupies one position.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<Cell<'a>> {
        self.rows().get(row_idx)?.cells().get(col_idx).copied()
    }

    /// Paragraphs of every cell, row by row and cell by cell.
    pub fn paragraphs(&self) -> Vec<Paragraph<'a>> {
        let mut paragraphs = Vec::new();
        for row in self.rows() {
            for cell in row.cells() {
                paragraphs.extend(cell.paragraphs());
            }
        }
        paragraphs
    }
}

/// A table row (`<w:tr>`).
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: &'a XmlElement,
}

impl<'a> Row<'a> {
    #[inline]
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Cells (`<w:tc>`) in order.
    pub fn cells(&self) -> SmallVec<[Cell<'a>; 16]> {
        self.element
            .child_elements()
            .filter(|e| e.is("tc"))
            .map(Cell::new)
            .collect()
    }
}

/// A table cell (`<w:tc>`).
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: &'a XmlElement,
}

impl<'a> Cell<'a> {
    #[inline]
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// Number of grid columns spanned, from `<w:tcPr><w:gridSpan w:val="n"/>`.
    ///
    /// Defaults to 1 when absent or invalid.
    pub fn grid_span(&self) -> usize {
        self.element
            .find_child("tcPr")
            .and_then(|pr| pr.find_child("gridSpan"))
            .and_then(|span| span.attribute_value("val"))
            .and_then(|val| val.parse::<usize>().ok())
            .filter(|&span| span > 0)
            .unwrap_or(1)
    }

    /// Direct paragraphs of the cell.
    ///
    /// Paragraphs of tables nested in the cell are not included.
    pub fn paragraphs(&self) -> SmallVec<[Paragraph<'a>; 8]> {
        self.element
            .child_elements()
            .filter(|e| e.is("p"))
            .map(Paragraph::new)
            .collect()
    }

    /// Cell text: paragraph texts joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collect mutable views of every cell paragraph of a `<w:tbl>`, row by row
/// and cell by cell.
pub(crate) fn cell_paragraphs_mut<'a>(table: &'a mut XmlElement, out: &mut Vec<ParagraphMut<'a>>) {
    for row in table.child_elements_mut().filter(|e| e.is("tr")) {
        for cell in row.child_elements_mut().filter(|e| e.is("tc")) {
            out.extend(
                cell.child_elements_mut()
                    .filter(|e| e.is("p"))
                    .map(ParagraphMut::new),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    const TABLE: &str = concat!(
        r#"<w:tbl xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
        r#"<w:tblPr/><w:tblGrid><w:gridCol/><w:gridCol/><w:gridCol/></w:tblGrid>"#,
        r#"<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>Merged</w:t></w:r></w:p></w:tc>"#,
        r#"<w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p><w:p><w:r><w:t>B</w:t></w:r></w:p></w:tc></w:tr>"#,
        r#"<w:tr><w:trPr/><w:tc><w:p/></w:tc><w:tc><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Nested</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/></w:tc>"#,
        r#"<w:tc><w:p><w:r><w:t>Total: 5</w:t></w:r></w:p></w:tc></w:tr>"#,
        r#"</w:tbl>"#
    );

    #[test]
    fn test_rows_and_cells() {
        let doc = XmlDocument::parse(TABLE.as_bytes()).unwrap();
        let table = Table::new(doc.root());
        assert_eq!(table.row_count(), 2);

        let rows = table.rows();
        assert_eq!(rows[0].cells().len(), 2);
        assert_eq!(rows[1].cells().len(), 3);

        let merged = table.cell(0, 0).unwrap();
        assert_eq!(merged.grid_span(), 2);
        assert_eq!(merged.text(), "Merged");
        assert_eq!(table.cell(0, 1).unwrap().text(), "A\nB");
        assert_eq!(table.cell(1, 0).unwrap().grid_span(), 1);
        assert!(table.cell(2, 0).is_none());
    }

    #[test]
    fn test_paragraph_order_skips_nested_tables() {
        let doc = XmlDocument::parse(TABLE.as_bytes()).unwrap();
        let texts: Vec<String> = Table::new(doc.root())
            .paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect();
        assert_eq!(texts, ["Merged", "A", "B", "", "", "Total: 5"]);
    }

    #[test]
    fn test_cell_paragraphs_mut_matches_read_order() {
        let mut doc = XmlDocument::parse(TABLE.as_bytes()).unwrap();
        let mut paragraphs = Vec::new();
        cell_paragraphs_mut(doc.root_mut(), &mut paragraphs);
        assert_eq!(paragraphs.len(), 6);

        paragraphs[5].set_text("Total: 10").unwrap();
        drop(paragraphs);
        assert_eq!(Table::new(doc.root()).cell(1, 2).unwrap().text(), "Total: 10");
    }
}
